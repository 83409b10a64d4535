//! Teach-pendant (TP) program tree.
//!
//! This is the shape produced by the TP program parser, which lives outside
//! this workspace. The tree is consumed read-only by editor queries; it
//! derives serde so a parsed program can be handed over as JSON.
//!
//! Line numbers and ranges are 1-based, like the rest of the tree.

use serde::{Deserialize, Serialize};

use crate::position::{AstNode, SourceRange};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TpProgram {
    pub name: String,
    /// Body instructions in program order.
    pub instructions: Vec<TpInstruction>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TpInstruction {
    /// 1-based source line the instruction starts on.
    pub line_number: u32,
    pub kind: TpInstructionKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TpInstructionKind {
    /// `JMP LBL[n]`
    JumpLabel { label: TpLabel },
    /// `J P[1] 100% FINE Skip,LBL[2]`
    Motion(TpMotion),
    /// `IF <condition>, <action>`
    If {
        condition: String,
        action: Box<TpInstructionKind>,
    },
    Wait { wait: TpWait },
    /// `WAIT (<mixed logic>) TIMEOUT,LBL[n]`
    MixedLogicWait {
        condition: String,
        timeout_label: TpLabel,
    },
    /// `LBL[n:comment]`
    LabelDefinition { label: TpLabel },
    /// `CALL PROG`
    Call { program: String },
    /// `R[1]=R[2]+1`, kept as text
    Assignment { text: String },
    /// `! comment`
    Comment { text: String },
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TpMotion {
    pub motion_type: TpMotionType,
    /// Target position reference as written, e.g. `P[1]` or `PR[3]`.
    pub position: String,
    pub speed: String,
    pub termination: String,
    /// Options in the order they were written.
    pub options: Vec<TpMotionOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TpMotionType {
    Joint,
    Linear,
    Circular,
    CircularArc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TpMotionOption {
    /// `Skip,LBL[n]`
    Skip { label: TpLabel },
    /// `Skip,LBL[n],PR[m]=LPOS`
    SkipJump { label: TpLabel, register: String },
    /// `ACC100`
    Acceleration { percent: u32 },
    /// `Offset` / `Offset,PR[n]`
    Offset { register: Option<String> },
    /// `Tool_Offset,PR[n]`
    ToolOffset { register: Option<String> },
    /// Any other option, kept as text
    Other { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TpWait {
    /// `WAIT 1.50(sec)`
    Time { seconds: String },
    /// `WAIT DI[1]=ON TIMEOUT,LBL[n]`
    Condition {
        condition: String,
        timeout_label: Option<TpLabel>,
    },
}

/// A `LBL[...]` occurrence, either a definition or a reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TpLabel {
    pub number: TpAccess,
    pub range: SourceRange,
}

impl AstNode for TpLabel {
    fn range(&self) -> SourceRange {
        self.range
    }
}

/// How a label number is given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TpAccess {
    /// `LBL[3]` or `LBL[3:Retry]`
    Direct {
        number: u32,
        comment: Option<String>,
    },
    /// `LBL[R[5]]`
    Indirect { register: u32 },
}
