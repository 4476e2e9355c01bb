//! OMS Operator CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for the OMS Operator, plus the
//! status condition helpers shared by the controller.

pub mod conditions;
pub mod oms_operator;

pub use conditions::*;
pub use oms_operator::*;
