use std::collections::HashMap;
use std::fmt::{Display, Formatter};

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// The generic type is the return value. Otherwise, regardless of request type,
/// we're just returning the error if there is one.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Miscellaneous student information keyed by the labels the portal renders.
pub type StudentInfo = HashMap<String, String>;

/// Miscellaneous school information keyed by the labels the portal renders.
pub type SchoolInfo = HashMap<String, InfoValue>;

/// The student identity shown on the portal's home page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Student {
    /// The district-assigned student ID, e.g. `904312`.
    pub id: String,
    /// The student's display name.
    pub name: String,
    /// The name of the school the student is enrolled in.
    pub school_name: String,
    /// The school's phone number, as displayed.
    pub school_phone: String,
    /// Path of the student's photo, relative to the district base URL.
    pub photo_path: String,
    /// The student GUID embedded in the photo path. `None` when the portal
    /// serves its placeholder photo instead of a real one.
    pub guid: Option<String>,
}

/// A teacher or staff contact.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Teacher {
    pub name: String,
    pub email: String,
}

impl Display for Teacher {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A class on the student's current schedule.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Class {
    /// The period this class meets in.
    pub period: u32,
    /// The course title, e.g. `AP Biology`.
    pub name: String,
    /// The room name. Kept as text since rooms are not always numeric
    /// (e.g. `Gym`, `Annex B`).
    pub room: String,
    /// The assigned teacher.
    pub teacher: Teacher,
    /// The portal's internal ID for this class.
    pub class_id: String,
}

impl Display for Class {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Period {} {} taught by {} in room {}",
            self.period, self.name, self.teacher, self.room
        )
    }
}

/// An assignment taken from the portal's calendar.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Assignment {
    /// The assignment title.
    pub name: String,
    /// The name of the class the assignment belongs to.
    pub class_name: String,
    /// The day the assignment is due.
    pub due_date: NaiveDate,
    /// The gradebook ID of the assignment.
    pub assignment_id: i64,
    /// The grading period GUID the assignment falls in.
    pub grading_period: String,
    /// The org-year GUID (school + school year) the assignment belongs to.
    pub org_year_gu: String,
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A scored (or still unscored) assignment from a class gradebook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedAssignment {
    /// The assignment title.
    pub name: String,
    /// The name of the class the assignment belongs to.
    pub class_name: String,
    /// The date the assignment was assigned or due, as listed in the grid.
    pub date: NaiveDate,
    /// The gradebook ID of the assignment.
    pub assignment_id: i64,
    /// The grading period GUID.
    pub grade_period_gu: String,
    /// The org-year GUID.
    pub org_year_gu: String,
    /// Points earned. `None` when the assignment has not been graded yet
    /// (the portal shows `N Points Possible` instead of a score).
    pub score: Option<f64>,
    /// Points possible.
    pub max_score: f64,
}

/// One class's grades within a single marking period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassGrades {
    /// The letter mark, e.g. `A-`.
    pub mark: String,
    /// The percentage score, e.g. `92.4`.
    pub score: f64,
    /// Every assignment in the marking period's gradebook grid.
    pub assignments: Vec<GradedAssignment>,
}

/// A marking period row under a course in the gradebook.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkingPeriod {
    /// The marking period's display name, e.g. `Quarter 1`.
    pub name: String,
    /// The letter mark for this marking period.
    pub mark: String,
    /// The score as displayed (usually a percentage, kept verbatim).
    pub score: String,
    /// The server-side control that renders this marking period's details.
    pub control_name: String,
    /// The opaque focus arguments the portal's JavaScript would pass to
    /// that control. Fed back verbatim when requesting class details.
    pub focus_args: Value,
}

/// A course listed in the gradebook together with its marking periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeBookEntry {
    /// The course title, with the leading period number stripped.
    pub name: String,
    /// The marking periods the portal lists for this course.
    pub marking_periods: Vec<MarkingPeriod>,
}

/// A grading period offered by the gradebook's period selector.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct GradingPeriod {
    /// The display name, e.g. `Quarter 2`.
    pub name: String,
    /// The grading period GUID.
    pub period_gu: String,
}

/// The school-year scope the gradebook page is currently rendered for.
/// These values come off the page's update panel and are required when
/// re-loading the gradebook for a different grading period.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct GradebookScope {
    /// The org-year GUID.
    pub org_year_gu: String,
    /// The school ID.
    pub school_id: String,
}

/// A completed course from the course history page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Course {
    /// The course title.
    pub name: String,
    /// The final mark, e.g. `B+`.
    pub mark: String,
    /// Credits attempted.
    pub credits_attempted: f64,
    /// Credits completed.
    pub credits_completed: f64,
}

impl Display for Course {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// One school year of course history. Each element of `semesters` is the
/// list of courses taken that semester, in page order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchoolYear {
    /// The year label as rendered, e.g. `2019-2020 (Grade 10)`.
    pub year: String,
    /// Courses grouped per semester.
    pub semesters: Vec<Vec<Course>>,
}

/// The student's full course history, most recent year first (page order).
pub type CourseHistory = Vec<SchoolYear>;

/// A value in the school information table. Most cells are plain text, but
/// staff cells carry a name and a mailto link.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum InfoValue {
    Text(String),
    Contact(Teacher),
}

#[derive(Error, Debug)]
pub enum Error {
    /// Occurs if there was an error encountered by the reqwest library.
    #[error("request error occurred: {0}")]
    Request(#[from] reqwest::Error),

    /// Occurs when there was an error parsing a URL.
    #[error("malformed url: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Occurs when there was an error with serde.
    #[error("serde error occurred: {0}")]
    Serde(#[from] serde_json::Error),

    /// Occurs when the portal responds with a non-success status code.
    #[error("unsuccessful status code: {0}")]
    BadStatusCode(u16),

    /// Occurs when the portal bounces the login form back instead of
    /// redirecting to the home page.
    #[error("incorrect username or password")]
    InvalidCredentials,

    /// Occurs when the given input is not valid.
    #[error("invalid input for '{0}' provided: {1}")]
    InvalidInput(&'static str, &'static str),

    /// Occurs when a page or fragment no longer has the shape this library
    /// knows how to scrape. The message names the element, attribute, or
    /// field that was expected. The portal is externally controlled and
    /// versioned, so this error is the loud signal that it changed shape;
    /// it is never downgraded to a partial result.
    #[error("page shape changed: expected {0}")]
    PageShape(String),
}

impl Error {
    /// Shorthand used by the parser layer.
    pub(crate) fn page_shape(expected: impl Into<String>) -> Self {
        Error::PageShape(expected.into())
    }
}
