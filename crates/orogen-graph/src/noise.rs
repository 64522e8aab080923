//! Composable noise sampler nodes.
//!
//! A [`NoiseNode`] is a closed kind sum plus the two global parameters the
//! engine accepts on every sampler (`dimensions`, `salt`). Rendering order is
//! load-bearing: globals first, then the `type:` tag, then the kind's own
//! parameters in declaration order. Unknown parameter keys are unrepresentable
//! by construction.

use orogen_emit::{Block, Scalar};

use crate::SaltSource;

/// Arithmetic combinator applied point-wise to two samplers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    /// Point-wise sum.
    Add,
    /// Point-wise difference.
    Sub,
    /// Point-wise product.
    Mul,
    /// Point-wise maximum.
    Max,
    /// Point-wise minimum.
    Min,
}

impl BinaryOp {
    fn tag(self) -> &'static str {
        match self {
            BinaryOp::Add => "ADD",
            BinaryOp::Sub => "SUB",
            BinaryOp::Mul => "MUL",
            BinaryOp::Max => "MAX",
            BinaryOp::Min => "MIN",
        }
    }
}

/// The closed set of sampler kinds, each with its typed parameter fields.
#[derive(Clone, Debug)]
pub enum NoiseKind {
    /// Flat field returning one value everywhere.
    Constant {
        /// The constant value.
        value: Scalar,
    },
    /// Gradient noise.
    Perlin {
        /// Sampling frequency.
        frequency: f64,
    },
    /// Cellular (Worley) noise.
    Cellular {
        /// Sampling frequency.
        frequency: f64,
        /// Distance metric name, when overriding the engine default.
        distance_function: Option<String>,
        /// Return value selector, when overriding the engine default.
        return_type: Option<String>,
    },
    /// Distorts the sampled coordinates of `function` by `warp`.
    DomainWarp {
        /// Sampler producing the coordinate offsets.
        warp: Box<NoiseNode>,
        /// Sampler evaluated at the warped coordinates.
        function: Box<NoiseNode>,
        /// Warp strength.
        amplitude: f64,
    },
    /// Arithmetic over named sub-samplers, resolved by the engine.
    Expression {
        /// The arithmetic expression text.
        expression: String,
        /// Named sub-samplers the expression may reference.
        variables: Vec<(String, NoiseNode)>,
    },
    /// Fractal Brownian motion over a base sampler.
    Fbm {
        /// Base sampler.
        function: Box<NoiseNode>,
        /// Octave count.
        octaves: u32,
        /// Per-octave amplitude falloff.
        gain: f64,
        /// Per-octave frequency growth.
        lacunarity: f64,
    },
    /// Ridged fractal over a base sampler.
    Ridged {
        /// Base sampler.
        function: Box<NoiseNode>,
        /// Octave count.
        octaves: u32,
        /// Per-octave amplitude falloff.
        gain: f64,
        /// Per-octave frequency growth.
        lacunarity: f64,
    },
    /// Point-wise arithmetic combination of two samplers.
    Binary {
        /// The operation.
        op: BinaryOp,
        /// Left operand.
        left: Box<NoiseNode>,
        /// Right operand.
        right: Box<NoiseNode>,
    },
}

impl NoiseKind {
    fn tag(&self) -> &'static str {
        match self {
            NoiseKind::Constant { .. } => "CONSTANT",
            NoiseKind::Perlin { .. } => "PERLIN",
            NoiseKind::Cellular { .. } => "CELLULAR",
            NoiseKind::DomainWarp { .. } => "DOMAIN_WARP",
            NoiseKind::Expression { .. } => "EXPRESSION",
            NoiseKind::Fbm { .. } => "FBM",
            NoiseKind::Ridged { .. } => "RIDGED",
            NoiseKind::Binary { op, .. } => op.tag(),
        }
    }
}

/// A node in the sampler graph.
#[derive(Clone, Debug)]
pub struct NoiseNode {
    dimensions: Option<u8>,
    salt: Option<u64>,
    kind: NoiseKind,
}

impl NoiseNode {
    fn from_kind(kind: NoiseKind) -> Self {
        Self {
            dimensions: None,
            salt: None,
            kind,
        }
    }

    /// A constant field.
    pub fn constant(value: impl Into<Scalar>) -> Self {
        Self::from_kind(NoiseKind::Constant {
            value: value.into(),
        })
    }

    /// Perlin gradient noise at the given frequency.
    pub fn perlin(frequency: f64) -> Self {
        Self::from_kind(NoiseKind::Perlin { frequency })
    }

    /// Cellular noise at the given frequency.
    pub fn cellular(frequency: f64) -> Self {
        Self::from_kind(NoiseKind::Cellular {
            frequency,
            distance_function: None,
            return_type: None,
        })
    }

    /// Domain-warps `function` by `warp` with the given amplitude.
    pub fn domain_warp(warp: NoiseNode, function: NoiseNode, amplitude: f64) -> Self {
        Self::from_kind(NoiseKind::DomainWarp {
            warp: Box::new(warp),
            function: Box::new(function),
            amplitude,
        })
    }

    /// An expression over named sub-samplers.
    pub fn expression(expression: &str, variables: Vec<(String, NoiseNode)>) -> Self {
        Self::from_kind(NoiseKind::Expression {
            expression: expression.to_string(),
            variables,
        })
    }

    /// Fractal Brownian motion over `function`.
    pub fn fbm(function: NoiseNode, octaves: u32, gain: f64, lacunarity: f64) -> Self {
        Self::from_kind(NoiseKind::Fbm {
            function: Box::new(function),
            octaves,
            gain,
            lacunarity,
        })
    }

    /// Ridged fractal over `function`.
    pub fn ridged(function: NoiseNode, octaves: u32, gain: f64, lacunarity: f64) -> Self {
        Self::from_kind(NoiseKind::Ridged {
            function: Box::new(function),
            octaves,
            gain,
            lacunarity,
        })
    }

    /// Point-wise arithmetic over two samplers.
    pub fn binary(op: BinaryOp, left: NoiseNode, right: NoiseNode) -> Self {
        Self::from_kind(NoiseKind::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// Sets the cellular distance metric. No effect on other kinds.
    pub fn with_distance_function(mut self, name: &str) -> Self {
        if let NoiseKind::Cellular {
            distance_function, ..
        } = &mut self.kind
        {
            *distance_function = Some(name.to_string());
        }
        self
    }

    /// Sets the cellular return selector. No effect on other kinds.
    pub fn with_return_type(mut self, name: &str) -> Self {
        if let NoiseKind::Cellular { return_type, .. } = &mut self.kind {
            *return_type = Some(name.to_string());
        }
        self
    }

    /// Sets the `dimensions` global parameter.
    pub fn with_dimensions(mut self, dimensions: u8) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    /// Sets an explicit `salt` global parameter.
    pub fn with_salt(mut self, salt: u64) -> Self {
        self.salt = Some(salt);
        self
    }

    /// Draws a salt from the given source.
    pub fn salted(self, salts: &mut SaltSource) -> Self {
        let salt = salts.next_salt();
        self.with_salt(salt)
    }

    /// The sampler's kind.
    pub fn kind(&self) -> &NoiseKind {
        &self.kind
    }

    /// Lowers the node to its block form: globals, `type:`, own parameters.
    pub fn to_block(&self) -> Block {
        let mut block = Block::new();
        if let Some(dimensions) = self.dimensions {
            block.scalar("dimensions", dimensions as i64);
        }
        if let Some(salt) = self.salt {
            block.scalar("salt", salt);
        }
        block.scalar("type", self.kind.tag());
        match &self.kind {
            NoiseKind::Constant { value } => {
                block.scalar("value", value.clone());
            }
            NoiseKind::Perlin { frequency } => {
                block.scalar("frequency", *frequency);
            }
            NoiseKind::Cellular {
                frequency,
                distance_function,
                return_type,
            } => {
                block.scalar("frequency", *frequency);
                if let Some(distance_function) = distance_function {
                    block.scalar("distance-function", distance_function.as_str());
                }
                if let Some(return_type) = return_type {
                    block.scalar("return", return_type.as_str());
                }
            }
            NoiseKind::DomainWarp {
                warp,
                function,
                amplitude,
            } => {
                block.block("warp", warp.to_block());
                block.block("function", function.to_block());
                block.scalar("amplitude", *amplitude);
            }
            NoiseKind::Expression {
                expression,
                variables,
            } => {
                block.scalar("expression", expression.as_str());
                if !variables.is_empty() {
                    let mut samplers = Block::new();
                    for (name, node) in variables {
                        samplers.block(name, node.to_block());
                    }
                    block.block("samplers", samplers);
                }
            }
            NoiseKind::Fbm {
                function,
                octaves,
                gain,
                lacunarity,
            }
            | NoiseKind::Ridged {
                function,
                octaves,
                gain,
                lacunarity,
            } => {
                block.block("function", function.to_block());
                block.scalar("octaves", *octaves);
                block.scalar("gain", *gain);
                block.scalar("lacunarity", *lacunarity);
            }
            NoiseKind::Binary { left, right, .. } => {
                block.block("left", left.to_block());
                block.block("right", right.to_block());
            }
        }
        block
    }

    /// Renders the node as a standalone document.
    pub fn render(&self) -> String {
        self.to_block().render()
    }
}
