use anyhow::{bail, Result};

/// Comparison used by a ladder tier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RangeOp {
    LessThan(f64),
    LessEqual(f64),
    GreaterThan(f64),
    GreaterEqual(f64),
    Equal(f64),
    Between(f64, f64), // Inclusive range: N-M
}

impl RangeOp {
    pub fn parse(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Some(val) = s.strip_prefix(">=") {
            Ok(RangeOp::GreaterEqual(parse_number(val)?))
        } else if let Some(val) = s.strip_prefix("<=") {
            Ok(RangeOp::LessEqual(parse_number(val)?))
        } else if let Some(val) = s.strip_prefix('>') {
            Ok(RangeOp::GreaterThan(parse_number(val)?))
        } else if let Some(val) = s.strip_prefix('<') {
            Ok(RangeOp::LessThan(parse_number(val)?))
        } else if s.contains('-') && !s.starts_with('-') {
            // Range format: "25-50"
            let parts: Vec<&str> = s.split('-').collect();
            if parts.len() == 2 {
                let low = parse_number(parts[0])?;
                let high = parse_number(parts[1])?;
                if low > high {
                    bail!("Range bounds out of order: {}", s)
                }
                Ok(RangeOp::Between(low, high))
            } else {
                bail!("Invalid range format: {}", s)
            }
        } else {
            Ok(RangeOp::Equal(parse_number(s)?))
        }
    }

    pub fn matches(&self, value: f64) -> bool {
        match *self {
            RangeOp::LessThan(n) => value < n,
            RangeOp::LessEqual(n) => value <= n,
            RangeOp::GreaterThan(n) => value > n,
            RangeOp::GreaterEqual(n) => value >= n,
            RangeOp::Equal(n) => value == n,
            RangeOp::Between(low, high) => value >= low && value <= high,
        }
    }
}

impl std::fmt::Display for RangeOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RangeOp::LessThan(n) => write!(f, "<{}", n),
            RangeOp::LessEqual(n) => write!(f, "<={}", n),
            RangeOp::GreaterThan(n) => write!(f, ">{}", n),
            RangeOp::GreaterEqual(n) => write!(f, ">={}", n),
            RangeOp::Equal(n) => write!(f, "{}", n),
            RangeOp::Between(low, high) => write!(f, "{}-{}", low, high),
        }
    }
}

fn parse_number(s: &str) -> Result<f64> {
    let n: f64 = s.trim().parse()?;
    if !n.is_finite() {
        bail!("Range bound must be finite: {}", s.trim())
    }
    Ok(n)
}

/// One rung of a point ladder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub op: RangeOp,
    pub points: u32,
}

impl Tier {
    pub const fn at_least(value: f64, points: u32) -> Self {
        Tier {
            op: RangeOp::GreaterEqual(value),
            points,
        }
    }

    pub const fn at_most(value: f64, points: u32) -> Self {
        Tier {
            op: RangeOp::LessEqual(value),
            points,
        }
    }
}

/// Points awarded by the first matching tier. An absent value earns nothing.
pub fn ladder_points(tiers: &[Tier], value: Option<f64>) -> u32 {
    let Some(value) = value else {
        return 0;
    };
    tiers
        .iter()
        .find(|tier| tier.op.matches(value))
        .map(|tier| tier.points)
        .unwrap_or(0)
}

/// Map a score onto a label using descending `>=` cut-offs, highest first.
pub fn bucket<L: Copy>(score: u32, cuts: &[(u32, L)], fallback: L) -> L {
    cuts.iter()
        .find(|(min, _)| score >= *min)
        .map(|(_, label)| *label)
        .unwrap_or(fallback)
}
