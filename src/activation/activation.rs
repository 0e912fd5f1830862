use serde::{Serialize, Deserialize};
use std::f64::consts::E;

use crate::error::NetError;

/// Element-wise activation with a known derivative.
///
/// Every variant carries a stable tag (see [`ActivationFunction::tag`]) which is what gets
/// written by the persistence codec.  Adding a variant means adding one arm to each match
/// below and claiming an unused tag; neither `Network` nor the trainers need to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum ActivationFunction {
    Identity,
    Sigmoid,
    Tanh,
}

impl ActivationFunction {
    /// Every built-in variant, in tag order.
    pub const ALL: [ActivationFunction; 3] = [
        ActivationFunction::Identity,
        ActivationFunction::Sigmoid,
        ActivationFunction::Tanh,
    ];

    pub fn eval(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => x,
            ActivationFunction::Sigmoid => 1.0 / (1.0 + E.powf(-x)),
            ActivationFunction::Tanh => x.tanh(),
        }
    }

    /// Derivative evaluated at the pre-activation value `x`.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Identity => 1.0,
            ActivationFunction::Sigmoid => {
                let fx = self.eval(x);
                fx * (1.0 - fx)
            }
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
        }
    }

    pub fn tag(&self) -> u8 {
        match self {
            ActivationFunction::Identity => 0,
            ActivationFunction::Sigmoid => 1,
            ActivationFunction::Tanh => 2,
        }
    }

    pub fn from_tag(tag: u8) -> Result<ActivationFunction, NetError> {
        ActivationFunction::ALL
            .into_iter()
            .find(|f| f.tag() == tag)
            .ok_or(NetError::UnknownActivation(tag))
    }
}

impl TryFrom<u8> for ActivationFunction {
    type Error = NetError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        ActivationFunction::from_tag(tag)
    }
}

impl From<ActivationFunction> for u8 {
    fn from(f: ActivationFunction) -> u8 {
        f.tag()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn identity_is_linear() {
        let f = ActivationFunction::Identity;
        assert_eq!(f.eval(-3.5), -3.5);
        assert_eq!(f.derivative(123.0), 1.0);
    }

    #[test]
    fn sigmoid_values() {
        let f = ActivationFunction::Sigmoid;
        assert_abs_diff_eq!(f.eval(0.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(f.derivative(0.0), 0.25, epsilon = 1e-12);
        assert!(f.eval(40.0) > 0.999_999);
        assert!(f.eval(-40.0) < 1e-6);
    }

    #[test]
    fn derivatives_match_finite_differences() {
        let h = 1e-6;
        for f in ActivationFunction::ALL {
            for &x in &[-2.0, -0.3, 0.0, 0.7, 1.9] {
                let numeric = (f.eval(x + h) - f.eval(x - h)) / (2.0 * h);
                assert_abs_diff_eq!(f.derivative(x), numeric, epsilon = 1e-6);
            }
        }
    }

    #[test]
    fn tags_are_unique_and_round_trip() {
        for f in ActivationFunction::ALL {
            assert_eq!(ActivationFunction::from_tag(f.tag()).unwrap(), f);
        }
        let mut tags: Vec<u8> = ActivationFunction::ALL.iter().map(|f| f.tag()).collect();
        tags.dedup();
        assert_eq!(tags.len(), ActivationFunction::ALL.len());
    }

    #[test]
    fn unknown_tag_is_rejected() {
        assert!(matches!(
            ActivationFunction::from_tag(9),
            Err(NetError::UnknownActivation(9))
        ));
        assert!(serde_json::from_str::<ActivationFunction>("7").is_err());
        assert_eq!(serde_json::to_string(&ActivationFunction::Sigmoid).unwrap(), "1");
    }
}
