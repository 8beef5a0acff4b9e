//! Turtle interpretation of expanded L-system strings
//!
//! The turtle walks the string once, left to right, carrying a transform
//! frame. `F` emits a branch and moves one segment along local +Y, rotation
//! symbols turn the frame about a local axis, `[` saves the turtle state and
//! thins the branch, `]` drops a leaf cluster at the branch tip and restores
//! the saved state.
//!
//! | Symbol | Effect |
//! |---|---|
//! | `F` | draw branch, advance |
//! | `+` `-` | rotate about local z |
//! | `/` `\` | rotate about local x |
//! | `&` `^` | rotate about local y |
//! | `[` | push, enter child branch |
//! | `]` | emit leaves, pop |
//!
//! Anything else is ignored, so grammars may use non-terminals such as `X`.
//! A `]` with nothing to pop still emits its leaves and then carries on.

use crate::core::types::{Mat4, Vec3};
use crate::math;
use crate::render::DrawInstruction;
use super::grammar::ExpandedString;
use super::leaf::LeafCluster;
use super::params::TreeParams;

/// Trunk radius never tapers below this fraction of the base scale
pub const TRUNK_TAPER_FLOOR: f32 = 0.3;

/// Branch scale decay when entering nesting depth 2, 3 and 4+.
///
/// Depth 1 uses [`TreeParams::branch_scale`].
pub const DEPTH_DECAY: [f32; 3] = [0.55, 0.65, 0.75];

/// A turtle command decoded from one grammar symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `F`
    Forward,
    /// `+`
    RollLeft,
    /// `-`
    RollRight,
    /// `/`
    PitchUp,
    /// `\`
    PitchDown,
    /// `&`
    TurnLeft,
    /// `^`
    TurnRight,
    /// `[`
    Push,
    /// `]`
    Pop,
}

impl Command {
    /// Command for `symbol`, or `None` for symbols the turtle ignores
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'F' => Some(Command::Forward),
            '+' => Some(Command::RollLeft),
            '-' => Some(Command::RollRight),
            '/' => Some(Command::PitchUp),
            '\\' => Some(Command::PitchDown),
            '&' => Some(Command::TurnLeft),
            '^' => Some(Command::TurnRight),
            '[' => Some(Command::Push),
            ']' => Some(Command::Pop),
            _ => None,
        }
    }
}

/// Everything `[` saves and `]` restores
#[derive(Debug, Clone, Copy, PartialEq)]
struct TurtleState {
    frame: Mat4,
    branch_scale: f32,
    branch_level: u32,
    /// Segments drawn at the current level; drives trunk taper
    segment_count: u32,
}

/// Result of a full interpretation pass
#[derive(Debug, Clone, Default)]
pub struct TurtleOutput {
    pub instructions: Vec<DrawInstruction>,
    /// `[` left on the stack at the end of the string
    pub open_branches: usize,
    /// `]` seen with an empty stack
    pub unmatched_closes: usize,
}

/// Stack-based turtle interpreter
pub struct TurtleInterpreter<'a> {
    params: &'a TreeParams,
    leaf_clusters: &'a [LeafCluster],
    next_cluster: usize,
    angle: f32,
    state: TurtleState,
    stack: Vec<TurtleState>,
    instructions: Vec<DrawInstruction>,
    unmatched_closes: usize,
}

impl<'a> TurtleInterpreter<'a> {
    /// Create a turtle standing at `origin` (the tree's world placement)
    pub fn new(params: &'a TreeParams, leaf_clusters: &'a [LeafCluster], origin: Mat4) -> Self {
        Self {
            params,
            leaf_clusters,
            next_cluster: 0,
            angle: params.angle_radians(),
            state: TurtleState {
                frame: origin,
                branch_scale: params.trunk_scale,
                branch_level: 0,
                segment_count: 0,
            },
            stack: Vec::new(),
            instructions: Vec::new(),
            unmatched_closes: 0,
        }
    }

    /// Interpret a whole string
    pub fn run(mut self, expanded: &ExpandedString) -> TurtleOutput {
        for symbol in expanded.symbols() {
            self.step(symbol);
        }
        self.finish()
    }

    /// Consume one symbol
    pub fn step(&mut self, symbol: char) {
        if let Some(command) = Command::from_symbol(symbol) {
            self.execute(command);
        }
    }

    /// Apply one command to the turtle state
    pub fn execute(&mut self, command: Command) {
        match command {
            Command::Forward => self.forward(),
            Command::RollLeft => self.turn(self.angle, Vec3::Z),
            Command::RollRight => self.turn(-self.angle, Vec3::Z),
            Command::PitchUp => self.turn(self.angle, Vec3::X),
            Command::PitchDown => self.turn(-self.angle, Vec3::X),
            Command::TurnLeft => self.turn(self.angle, Vec3::Y),
            Command::TurnRight => self.turn(-self.angle, Vec3::Y),
            Command::Push => self.push(),
            Command::Pop => self.pop(),
        }
    }

    fn forward(&mut self) {
        let length = self.params.length;
        let state = &mut self.state;

        if state.branch_level == 0 {
            let taper = (1.0 - state.segment_count as f32 * self.params.taper).max(TRUNK_TAPER_FLOOR);
            state.branch_scale = self.params.trunk_scale * taper;
            state.segment_count += 1;
        }

        let scale = Vec3::new(state.branch_scale, length, state.branch_scale);
        self.instructions.push(DrawInstruction::branch(math::scale(state.frame, scale)));

        state.frame = math::translate(state.frame, Vec3::new(0.0, length, 0.0));
    }

    fn turn(&mut self, angle: f32, axis: Vec3) {
        self.state.frame = math::rotate(self.state.frame, angle, axis);
    }

    fn push(&mut self) {
        self.stack.push(self.state);

        let state = &mut self.state;
        state.branch_level += 1;
        state.segment_count = 0;
        state.branch_scale *= child_scale_factor(state.branch_level, self.params.branch_scale);
    }

    fn pop(&mut self) {
        // Clusters pair with `]` by occurrence order, matched or not
        let cluster = self.leaf_clusters.get(self.next_cluster);
        self.next_cluster += 1;

        if let Some(cluster) = cluster {
            for leaf in cluster.leaves() {
                let transform = self.state.frame * leaf.local_transform();
                self.instructions.push(DrawInstruction::leaf(transform));
            }
        }

        match self.stack.pop() {
            Some(saved) => self.state = saved,
            None => self.unmatched_closes += 1,
        }
    }

    /// Current nesting depth of the stack
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    /// Scale applied to the current branch's segments
    pub fn branch_scale(&self) -> f32 {
        self.state.branch_scale
    }

    /// Branch depth, 0 on the trunk
    pub fn branch_level(&self) -> u32 {
        self.state.branch_level
    }

    /// `F` segments drawn on the current branch
    pub fn segment_count(&self) -> u32 {
        self.state.segment_count
    }

    /// Current turtle frame
    pub fn frame(&self) -> Mat4 {
        self.state.frame
    }

    /// Instructions emitted so far
    pub fn instructions(&self) -> &[DrawInstruction] {
        &self.instructions
    }

    /// Stop interpreting and hand back the instructions with bracket diagnostics
    pub fn finish(self) -> TurtleOutput {
        if self.unmatched_closes > 0 || !self.stack.is_empty() {
            log::debug!(
                "Turtle finished with {} unmatched ']' and {} open '['",
                self.unmatched_closes,
                self.stack.len()
            );
        }
        TurtleOutput {
            instructions: self.instructions,
            open_branches: self.stack.len(),
            unmatched_closes: self.unmatched_closes,
        }
    }
}

/// Multiplicative branch scale change when entering nesting depth `level`
pub fn child_scale_factor(level: u32, branch_scale: f32) -> f32 {
    match level {
        0 => 1.0,
        1 => branch_scale,
        2 => DEPTH_DECAY[0],
        3 => DEPTH_DECAY[1],
        _ => DEPTH_DECAY[2],
    }
}

/// Produce draw instructions for `expanded`, starting at `origin`
pub fn interpret(
    expanded: &ExpandedString,
    params: &TreeParams,
    leaf_clusters: &[LeafCluster],
    origin: Mat4,
) -> Vec<DrawInstruction> {
    TurtleInterpreter::new(params, leaf_clusters, origin)
        .run(expanded)
        .instructions
}
