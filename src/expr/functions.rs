use std::f64::consts;

use super::EvalError;

/// Named constants, replaced by their value while parsing.
pub(super) fn constant(name: &str) -> Option<f64> {
    match name {
        "pi" | "PI" => Some(consts::PI),
        "e" | "E" => Some(consts::E),
        "tau" => Some(consts::TAU),
        "phi" => Some(1.618_033_988_749_895),
        _ => None,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Function {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Sqrt,
    Cbrt,
    Abs,
    Exp,
    Log,
    Log2,
    Log10,
    Ln,
    Floor,
    Ceil,
    Round,
    Sign,
    Min,
    Max,
    Pow,
    Mod,
}

impl Function {
    const ALL: [Function; 25] = [
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Asin,
        Function::Acos,
        Function::Atan,
        Function::Sinh,
        Function::Cosh,
        Function::Tanh,
        Function::Sqrt,
        Function::Cbrt,
        Function::Abs,
        Function::Exp,
        Function::Log,
        Function::Log2,
        Function::Log10,
        Function::Ln,
        Function::Floor,
        Function::Ceil,
        Function::Round,
        Function::Sign,
        Function::Min,
        Function::Max,
        Function::Pow,
        Function::Mod,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Asin => "asin",
            Function::Acos => "acos",
            Function::Atan => "atan",
            Function::Sinh => "sinh",
            Function::Cosh => "cosh",
            Function::Tanh => "tanh",
            Function::Sqrt => "sqrt",
            Function::Cbrt => "cbrt",
            Function::Abs => "abs",
            Function::Exp => "exp",
            Function::Log => "log",
            Function::Log2 => "log2",
            Function::Log10 => "log10",
            Function::Ln => "ln",
            Function::Floor => "floor",
            Function::Ceil => "ceil",
            Function::Round => "round",
            Function::Sign => "sign",
            Function::Min => "min",
            Function::Max => "max",
            Function::Pow => "pow",
            Function::Mod => "mod",
        }
    }

    /// Accepted argument counts, inclusive.
    pub fn arity(self) -> (usize, usize) {
        match self {
            Function::Log => (1, 2),
            Function::Pow | Function::Mod => (2, 2),
            Function::Min | Function::Max => (1, usize::MAX),
            _ => (1, 1),
        }
    }

    /// Argument count has already been checked by the parser.
    pub(super) fn apply(self, args: &[f64]) -> Result<f64, EvalError> {
        let x = args.first().copied().unwrap_or(f64::NAN);
        let y = args.get(1).copied();

        let value = match self {
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => x.tan(),
            Function::Asin => x.asin(),
            Function::Acos => x.acos(),
            Function::Atan => x.atan(),
            Function::Sinh => x.sinh(),
            Function::Cosh => x.cosh(),
            Function::Tanh => x.tanh(),
            Function::Sqrt => x.sqrt(),
            Function::Cbrt => x.cbrt(),
            Function::Abs => x.abs(),
            Function::Exp => x.exp(),
            Function::Log => match y {
                Some(base) => x.ln() / base.ln(),
                None => x.ln(),
            },
            Function::Ln => x.ln(),
            Function::Log2 => x.log2(),
            Function::Log10 => x.log10(),
            Function::Floor => x.floor(),
            Function::Ceil => x.ceil(),
            Function::Round => x.round(),
            Function::Sign => {
                if x == 0.0 {
                    0.0
                } else {
                    x.signum()
                }
            }
            Function::Min => args.iter().copied().fold(f64::INFINITY, f64::min),
            Function::Max => args.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Function::Pow => x.powf(y.unwrap_or(f64::NAN)),
            Function::Mod => return floored_mod(x, y.unwrap_or(f64::NAN)),
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::Domain(self.name()))
        }
    }
}

/// `a - b * floor(a / b)`: the result takes the sign of the divisor.
pub(super) fn floored_mod(a: f64, b: f64) -> Result<f64, EvalError> {
    if b == 0.0 {
        return Err(EvalError::DivisionByZero);
    }
    let r = a - b * (a / b).floor();
    if r.is_finite() {
        Ok(r)
    } else {
        Err(EvalError::Domain("modulo"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_function_resolves_by_name() {
        for f in Function::ALL {
            assert_eq!(Function::from_name(f.name()), Some(f));
        }
        assert_eq!(Function::from_name("foo"), None);
    }

    #[test]
    fn log_with_base() {
        let v = Function::Log.apply(&[8.0, 2.0]).expect("finite");
        assert!((v - 3.0).abs() < 1e-12);
        assert!(Function::Log.apply(&[-1.0]).is_err());
    }

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(Function::Sign.apply(&[-0.0]), Ok(0.0));
        assert_eq!(Function::Sign.apply(&[-3.0]), Ok(-1.0));
    }
}
