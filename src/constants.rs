pub(crate) const MY_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, \
like Gecko) Chrome/97.0.4692.71 Safari/537.36";

// Page paths, joined onto the district base URL. Every PXP2 page takes the
// `AGU=0` query parameter (the "currently focused student" selector).
pub(crate) const LOGIN_PAGE: &str = "PXP2_Login_Student.aspx?regenerateSessionId=True";
pub(crate) const HOME_PAGE: &str = "Home_PXP2.aspx";
pub(crate) const SCHEDULE_PAGE: &str = "PXP2_ClassSchedule.aspx?AGU=0";
pub(crate) const CALENDAR_PAGE: &str = "PXP2_Calendar.aspx?AGU=0";
pub(crate) const STUDENT_INFO_PAGE: &str = "PXP2_MyAccount.aspx?AGU=0";
pub(crate) const SCHOOL_INFO_PAGE: &str = "PXP2_SchoolInformation.aspx?AGU=0";
pub(crate) const COURSE_HISTORY_PAGE: &str = "PXP2_CourseHistory.aspx?AGU=0";
pub(crate) const GRADE_BOOK_PAGE: &str = "PXP2_Gradebook.aspx?AGU=0";

// AJAX service endpoints driven by the portal's client-side JavaScript.
pub(crate) const DATA_GRID_ENDPOINT: &str = "service/PXP2Communication.asmx/DXDataGridRequest";
pub(crate) const LOAD_CONTROL_ENDPOINT: &str = "service/PXP2Communication.asmx/LoadControl";

// ASPX form field names.
pub(crate) const USERNAME_FIELD: &str = "ctl00$MainContent$username";
pub(crate) const PASSWORD_FIELD: &str = "ctl00$MainContent$password";
pub(crate) const CALENDAR_MONTH_FIELD: &str = "LB";

// Server-side control names for the LoadControl endpoint.
pub(crate) const GRADEBOOK_CLASSES_CONTROL: &str = "Gradebook_SchoolClasses";
pub(crate) const CLASS_DETAILS_CONTROL: &str = "Gradebook_ClassDetails";

/// Photo src the portal serves when no student photo is on file.
pub(crate) const NO_PHOTO_SRC: &str = "Images/PXP/NoPhoto.png";
