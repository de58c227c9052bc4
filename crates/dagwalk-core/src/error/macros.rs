//! Error macros for dagwalk

/// Macro for creating invalid value errors
#[macro_export]
macro_rules! bail_invalid {
    ($context:expr, $value:expr) => {
        return Err($crate::error::DagwalkError::invalid_value($context, $value))
    };
}

/// Macro for creating manifest validation errors
#[macro_export]
macro_rules! bail_manifest {
    ($path:expr, $reason:expr) => {
        return Err($crate::error::DagwalkError::invalid_manifest(
            $path, $reason,
        ))
    };
}
