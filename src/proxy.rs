//! Configuration descriptors for abstract rendering.
//!
//! The plotting side builds, inspects and serializes these; `reify` turns
//! each one into the engine operator it stands for.

use crate::aggregation::{AggregatorOp, InfoOp};
use crate::shading::{Rgba, ShaderOp};
use serde::{Deserialize, Serialize};
use std::fmt;

/// What a shader produces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutKind {
    /// Grid of values, colored client side through a palette.
    #[default]
    Image,
    /// Grid of packed colors.
    RgbImage,
    /// Multi-segment lines (iso contours).
    PolyLine,
}

impl fmt::Display for OutKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutKind::Image => "image",
            OutKind::RgbImage => "rgb_image",
            OutKind::PolyLine => "poly_line",
        };
        f.write_str(name)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Aggregator {
    Sum,
    #[default]
    Count,
}

impl Aggregator {
    pub fn reify(&self) -> AggregatorOp {
        match self {
            Aggregator::Sum => AggregatorOp::Sum,
            Aggregator::Count => AggregatorOp::Count,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Info {
    Const { val: f64 },
}

impl Default for Info {
    fn default() -> Self {
        Info::Const { val: 1.0 }
    }
}

impl Info {
    pub fn constant(val: f64) -> Self {
        Info::Const { val }
    }

    pub fn reify(&self) -> InfoOp {
        match *self {
            Info::Const { val } => InfoOp::Const(val),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Shader {
    #[default]
    Id,
    Interpolate {
        low: f64,
        high: f64,
    },
    Sqrt,
    Cuberoot,
    InterpolateColor {
        low: Rgba,
        high: Rgba,
    },
    Seq(Seq),
}

impl Shader {
    pub fn out(&self) -> OutKind {
        match self {
            Shader::Id | Shader::Interpolate { .. } | Shader::Sqrt | Shader::Cuberoot => {
                OutKind::Image
            }
            Shader::InterpolateColor { .. } => OutKind::RgbImage,
            Shader::Seq(seq) => seq.out(),
        }
    }

    /// Chains `next` after `self`.
    pub fn then(self, next: Shader) -> Shader {
        compose(self, next)
    }

    pub fn reify(&self) -> ShaderOp {
        match self {
            Shader::Id => ShaderOp::Id,
            Shader::Interpolate { low, high } => ShaderOp::Interpolate {
                low: *low,
                high: *high,
            },
            Shader::Sqrt => ShaderOp::Sqrt,
            Shader::Cuberoot => ShaderOp::Cuberoot,
            Shader::InterpolateColor { low, high } => ShaderOp::InterpolateColor {
                low: *low,
                high: *high,
            },
            Shader::Seq(seq) => seq.first.reify().then(seq.second.reify()),
        }
    }
}

/// Builds a two-step shader: `first`, then `second`.
pub fn compose(first: Shader, second: Shader) -> Shader {
    Shader::Seq(Seq::new(first, second))
}

/// Two shaders applied in sequence. Its output kind is the second one's,
/// fixed when the pair is built.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "SeqParts")]
pub struct Seq {
    first: Box<Shader>,
    second: Box<Shader>,
    out: OutKind,
}

#[derive(Deserialize)]
struct SeqParts {
    first: Box<Shader>,
    second: Box<Shader>,
}

impl From<SeqParts> for Seq {
    fn from(parts: SeqParts) -> Self {
        Seq::new(*parts.first, *parts.second)
    }
}

impl Seq {
    pub fn new(first: Shader, second: Shader) -> Self {
        let out = second.out();
        Self {
            first: Box::new(first),
            second: Box::new(second),
            out,
        }
    }

    pub fn first(&self) -> &Shader {
        &self.first
    }

    pub fn second(&self) -> &Shader {
        &self.second
    }

    pub fn out(&self) -> OutKind {
        self.out
    }
}
