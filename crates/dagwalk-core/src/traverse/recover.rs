//! Fetch failure policies
//!
//! A recovery function receives the error from a failed link resolution and
//! answers `Ok(())` to skip that subtree or `Err` to stop the traversal.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::RecoverFn;
use crate::error::DagwalkError;

/// Configured reaction to a fetch failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnError {
    /// Stop at the first failure
    #[default]
    Abort,
    /// Skip the unreachable subtree and keep going
    Skip,
}

impl OnError {
    /// Build the recovery function for this setting.
    /// `Abort` needs none: a missing recovery function is fatal on its own.
    pub fn policy<'a, E: 'a>(self) -> Option<RecoverFn<'a, E>> {
        match self {
            OnError::Abort => None,
            OnError::Skip => Some(Box::new(skip_all())),
        }
    }
}

impl FromStr for OnError {
    type Err = DagwalkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abort" => Ok(OnError::Abort),
            "skip" => Ok(OnError::Skip),
            other => Err(DagwalkError::invalid_value(
                "on-error",
                format!("'{}' (expected: abort, skip)", other),
            )),
        }
    }
}

impl fmt::Display for OnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OnError::Abort => write!(f, "abort"),
            OnError::Skip => write!(f, "skip"),
        }
    }
}

/// Skip every unreachable subtree
pub fn skip_all<E>() -> impl FnMut(E) -> Result<(), E> {
    |_| Ok(())
}

/// Stop on every failure, same as setting no recovery function
pub fn abort_all<E>() -> impl FnMut(E) -> Result<(), E> {
    Err::<(), E>
}

/// Skip failures matching `pred`, stop on the rest
pub fn skip_when<E>(mut pred: impl FnMut(&E) -> bool) -> impl FnMut(E) -> Result<(), E> {
    move |err| if pred(&err) { Ok(()) } else { Err(err) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_on_error_parse() {
        assert_eq!("abort".parse::<OnError>().unwrap(), OnError::Abort);
        assert_eq!("SKIP".parse::<OnError>().unwrap(), OnError::Skip);
        assert!("retry".parse::<OnError>().is_err());
    }

    #[test]
    fn test_on_error_policy() {
        assert!(OnError::Abort.policy::<String>().is_none());

        let mut skip = OnError::Skip.policy::<String>().unwrap();
        assert_eq!(skip("gone".to_string()), Ok(()));
    }

    #[test]
    fn test_skip_when() {
        let mut policy = skip_when(|e: &String| e.starts_with("missing"));
        assert_eq!(policy("missing a".to_string()), Ok(()));
        assert_eq!(policy("timeout".to_string()), Err("timeout".to_string()));
    }

    #[test]
    fn test_abort_all_returns_original() {
        let mut policy = abort_all();
        assert_eq!(policy(7), Err(7));
    }
}
