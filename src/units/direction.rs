use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectionConvention {
    /// Nautical, the direction waves are coming from, clockwise from true north
    From,
}

impl DirectionConvention {
    pub fn as_str(&self) -> &'static str {
        match self {
            DirectionConvention::From => "nautical",
        }
    }
}
