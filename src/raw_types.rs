//! Serde mirror of the JSON the portal's AJAX endpoints actually return.
//!
//! These types deliberately preserve the server's field names and nesting,
//! including the portal's habit of embedding JSON *strings* inside JSON
//! (e.g. a schedule row's `Teacher` cell). The parser module converts these
//! into the clean types in [`crate::types`].

use std::fmt::{Display, Formatter};

use serde::Deserialize;
use serde_json::Value;

/// The `{"d": {"Data": ...}}` envelope every `PXP2Communication.asmx`
/// response is wrapped in.
#[derive(Debug, Clone, Deserialize)]
pub struct RawServiceResponse<T> {
    pub d: RawServiceResult<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawServiceResult<T> {
    #[serde(rename = "Data")]
    pub data: T,
}

/// Payload of a `LoadControl` response: a server-rendered HTML fragment.
#[derive(Debug, Clone, Deserialize)]
pub struct RawControlHtml {
    pub html: String,
}

/// Payload of a `DXDataGridRequest` response: untyped grid rows. The row
/// shape depends on the requested data source, so rows stay as raw values
/// until a specific parser picks them up.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGridData {
    pub data: Vec<Value>,
}

/// A grid cell that the portal serves sometimes as a number and sometimes
/// as a string, depending on the district's data.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumOrStr {
    Num(i64),
    Str(String),
}

impl NumOrStr {
    pub fn as_u32(&self) -> Option<u32> {
        match self {
            NumOrStr::Num(n) => u32::try_from(*n).ok(),
            NumOrStr::Str(s) => s.trim().parse().ok(),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            NumOrStr::Num(n) => Some(*n),
            NumOrStr::Str(s) => s.trim().parse().ok(),
        }
    }
}

impl Display for NumOrStr {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            NumOrStr::Num(n) => write!(f, "{n}"),
            NumOrStr::Str(s) => write!(f, "{s}"),
        }
    }
}

/// One row of the class schedule data grid.
#[derive(Debug, Clone, Deserialize)]
pub struct RawScheduleRow {
    #[serde(rename = "Period")]
    pub period: NumOrStr,
    #[serde(rename = "CourseTitle")]
    pub course_title: String,
    #[serde(rename = "RoomName")]
    pub room_name: NumOrStr,
    /// A nested JSON string: `{"teacherName": ..., "email": ...}`.
    #[serde(rename = "Teacher")]
    pub teacher: String,
    #[serde(rename = "ID")]
    pub id: NumOrStr,
}

/// The decoded `Teacher` cell of a schedule row.
#[derive(Debug, Clone, Deserialize)]
pub struct RawTeacherCell {
    #[serde(rename = "teacherName")]
    pub teacher_name: String,
    pub email: String,
}

/// The object literal passed to `PXP.DevExpress.ExtendGridConfiguration`
/// in a gradebook class-details fragment, after the parser has quoted the
/// bare `PXP.*` identifiers so the blob becomes valid JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGridConfig {
    #[serde(rename = "dataSource")]
    pub data_source: Vec<RawGradebookRow>,
}

/// One assignment row of the class-details grid.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGradebookRow {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "gradeBookId")]
    pub grade_book_id: NumOrStr,
    /// Either `earned/possible` or `N Points Possible` for ungraded work.
    #[serde(rename = "GBPoints")]
    pub gb_points: String,
    /// A nested JSON string: `{"value": ..., "hrefAttributes": ...}`, where
    /// `hrefAttributes` embeds a `data-focus={...}` attribute.
    #[serde(rename = "GBAssignment")]
    pub gb_assignment: String,
}

/// The decoded `GBAssignment` cell of a class-details grid row.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAssignmentCell {
    pub value: String,
    #[serde(rename = "hrefAttributes")]
    pub href_attributes: String,
}

/// The JSON payload of a `data-focus` attribute: which server-side control
/// to load and the opaque arguments to pass it.
#[derive(Debug, Clone, Deserialize)]
pub struct RawFocusData {
    #[serde(rename = "LoadParams")]
    pub load_params: Option<RawLoadParams>,
    #[serde(rename = "FocusArgs")]
    pub focus_args: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawLoadParams {
    #[serde(rename = "ControlName")]
    pub control_name: String,
}

/// The two focus-argument GUIDs the gradebook assignment rows carry.
/// Other keys vary per control and are left in the raw [`Value`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawFocusKeys {
    #[serde(rename = "gradePeriodGU")]
    pub grade_period_gu: String,
    #[serde(rename = "OrgYearGU")]
    pub org_year_gu: String,
}
