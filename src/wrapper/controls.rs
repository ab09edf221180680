//! Request bodies for the portal's two AJAX services.
//!
//! The portal's client-side JavaScript drives sub-views through the
//! `LoadControl` endpoint (returns a rendered HTML fragment) and grids
//! through the `DXDataGridRequest` endpoint (returns rows). Both take a
//! `{"request": {...}}` envelope. The constructors here fill in the
//! constant defaults and require the page-scraped GUIDs as arguments, so
//! there is no hidden parameter state.

use serde_json::{json, Value};

use crate::constants::GRADEBOOK_CLASSES_CONTROL;
use crate::parser::DataGridCall;
use crate::types::{GradebookScope, MarkingPeriod};

/// A `LoadControl` request: a server-side control name plus its opaque
/// parameters.
pub(crate) struct LoadControl {
    pub name: String,
    pub params: Value,
}

impl LoadControl {
    /// The control that re-renders the gradebook course list for a
    /// specific grading period.
    pub fn gradebook_classes(grade_period_gu: &str, scope: &GradebookScope) -> Self {
        Self {
            name: GRADEBOOK_CLASSES_CONTROL.to_string(),
            params: json!({
                "AGU": 0,
                "gradePeriodGU": grade_period_gu,
                "GradingPeriodGroup": "Regular",
                "OrgYearGU": scope.org_year_gu,
                "schoolID": scope.school_id,
            }),
        }
    }

    /// The control that renders one marking period's class details, using
    /// the focus arguments scraped off the gradebook page.
    pub fn class_details(marking_period: &MarkingPeriod) -> Self {
        Self {
            name: marking_period.control_name.clone(),
            params: marking_period.focus_args.clone(),
        }
    }

    /// The `{"request": ...}` envelope the endpoint expects.
    pub fn body(&self) -> Value {
        json!({
            "request": {
                "control": self.name,
                "parameters": self.params,
            }
        })
    }
}

/// The `{"request": ...}` envelope for a `DXDataGridRequest`. Note that
/// `gridParameters` is sent as a JSON *string*, not an object — the
/// portal's own JavaScript does the same double encoding.
pub(crate) fn data_grid_body(call: &DataGridCall, load_options: Value) -> Value {
    json!({
        "request": {
            "agu": 0,
            "dataRequestType": "Load",
            "dataSourceTypeName": call.source_name,
            "gridParameters": call.parameters.to_string(),
            "loadOptions": load_options,
        }
    })
}
