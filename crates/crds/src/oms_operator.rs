//! OmsOperator CRD
//!
//! Requests a one-shot probe of an O2IMS inventory endpoint and records the
//! outcome as a `Done` condition.

use crate::conditions::{Condition, DONE_CONDITION, find_condition};
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[kube(
    group = "whatnot.etamhof",
    version = "v1alpha1",
    kind = "OmsOperator",
    namespaced,
    status = "OmsOperatorStatus",
    derive = "PartialEq"
)]
#[serde(rename_all = "camelCase")]
pub struct OmsOperatorSpec {
    /// Index into the fixed O2IMS endpoint table (0-4)
    #[serde(default)]
    #[schemars(range(min = 0, max = 4))]
    pub end_point: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OmsOperatorStatus {
    /// Observations of the resource's processing state, keyed by type
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl OmsOperator {
    /// Conditions recorded on the status subresource, empty when there is no status yet.
    pub fn conditions(&self) -> &[Condition] {
        self.status
            .as_ref()
            .map(|s| s.conditions.as_slice())
            .unwrap_or_default()
    }

    /// The `Done` condition, if the resource has been processed.
    pub fn done_condition(&self) -> Option<&Condition> {
        find_condition(self.conditions(), DONE_CONDITION)
    }

    /// A resource carrying a `Done` condition is never reconciled again.
    pub fn is_terminal(&self) -> bool {
        self.done_condition().is_some()
    }
}
