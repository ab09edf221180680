use reqwest::Response;
use serde_json::{json, Value};
use tracing::debug;

use crate::constants::{
    CALENDAR_MONTH_FIELD, CALENDAR_PAGE, COURSE_HISTORY_PAGE, DATA_GRID_ENDPOINT, GRADE_BOOK_PAGE,
    HOME_PAGE, LOAD_CONTROL_ENDPOINT, LOGIN_PAGE, PASSWORD_FIELD, SCHEDULE_PAGE, SCHOOL_INFO_PAGE,
    STUDENT_INFO_PAGE, USERNAME_FIELD,
};
use crate::parser;
use crate::raw_types::{RawControlHtml, RawGridData, RawServiceResponse};
use crate::types::{
    Assignment, Class, ClassGrades, CourseHistory, Error, GradeBookEntry, GradingPeriod,
    MarkingPeriod, Result, SchoolInfo, Student, StudentInfo,
};
use crate::wrapper::controls::{data_grid_body, LoadControl};
use crate::wrapper::request_data::{ReqType, SessionData};
use crate::wrapper::wrapper_builder::StudentVueBuilder;

mod controls;
mod request_data;
pub mod wrapper_builder;

/// A logged-in client for a district's StudentVue portal (the PXP2, AJAX
/// generation). Each accessor fetches the relevant page or AJAX endpoint
/// and hands the body to the matching extractor in [`crate::parser`].
///
/// The session lives entirely in the HTTP client's cookie jar; the client
/// itself holds no other mutable state.
pub struct StudentVue {
    data: SessionData,
    student: Student,
}

impl StudentVue {
    /// Logs into the portal with the default client settings. Use
    /// [`StudentVue::builder`] to customize the client, user agent, or
    /// timeout.
    ///
    /// # Parameters
    /// - `district_url`: The district's portal URL, e.g.
    ///   `https://portal.sfusd.edu`.
    /// - `username`: The portal account's username.
    /// - `password`: The portal account's password.
    ///
    /// # Returns
    /// The logged-in client, or an error — notably
    /// [`Error::InvalidCredentials`] when the portal rejects the login.
    ///
    /// # Example
    /// ```rust,no_run
    /// use studentvue::wrapper::StudentVue;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> studentvue::types::Result<()> {
    /// let client = StudentVue::login("portal.sfusd.edu", "username", "password").await?;
    /// println!("logged in as {}", client.student().name);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn login(district_url: &str, username: &str, password: &str) -> Result<Self> {
        Self::builder()
            .with_district_url(district_url)
            .login(username, password)
            .await
    }

    /// Creates a new builder that can be used to construct a `StudentVue`
    /// client with custom settings.
    ///
    /// # Returns
    /// The builder.
    pub fn builder() -> StudentVueBuilder {
        StudentVueBuilder::new()
    }

    /// Performs the actual two-step form login: fetch the login page,
    /// harvest the hidden ASPX fields, post them back with the
    /// credentials, and verify that the portal redirected to the home
    /// page. Landing anywhere else means the login was bounced.
    pub(crate) async fn login_with(
        data: SessionData,
        username: &str,
        password: &str,
    ) -> Result<Self> {
        let login_url = data.url(LOGIN_PAGE)?;
        debug!(url = %login_url, "fetching login page");
        let resp = check_status(data.req(ReqType::Get(login_url.clone())).send().await?)?;
        let login_page = resp.text().await?;

        let mut fields = parser::parse_aspnet_form(&login_page)?;
        fields.insert(USERNAME_FIELD.to_string(), username.to_string());
        fields.insert(PASSWORD_FIELD.to_string(), password.to_string());

        let resp = check_status(
            data.req(ReqType::Post(login_url))
                .form(&fields)
                .send()
                .await?,
        )?;

        if resp.url().as_str() != data.url(HOME_PAGE)?.as_str() {
            return Err(Error::InvalidCredentials);
        }

        let home_page = resp.text().await?;
        let student = parser::parse_home_page(&home_page)?;
        debug!(student = %student.name, "logged in");

        Ok(Self { data, student })
    }

    /// The student identity parsed off the home page at login time.
    pub fn student(&self) -> &Student {
        &self.student
    }

    /// Gets the student's class schedule.
    ///
    /// # Parameters
    /// - `semester`: If provided, the schedule for that semester index is
    ///   fetched instead of the default one.
    ///
    /// # Returns
    /// The classes on the schedule. An empty vector means the portal
    /// rendered no schedule grid (e.g. outside the school year).
    ///
    /// # Example
    /// ```rust,no_run
    /// use studentvue::wrapper::StudentVue;
    ///
    /// # #[tokio::main(flavor = "current_thread")]
    /// # async fn main() -> studentvue::types::Result<()> {
    /// let client = StudentVue::login("portal.sfusd.edu", "username", "password").await?;
    /// for class in client.schedule(None).await? {
    ///     println!("{class}");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn schedule(&self, semester: Option<u32>) -> Result<Vec<Class>> {
        let path = match semester {
            Some(semester) => format!("{SCHEDULE_PAGE}&VDT={semester}"),
            None => SCHEDULE_PAGE.to_string(),
        };

        let page = self.get_text(&path).await?;
        let Some(call) = parser::parse_data_grid_call(&page)? else {
            return Ok(vec![]);
        };

        // The same load options the page's own grid component sends.
        let rows = self
            .data_grid(
                &call,
                json!({
                    "group": null,
                    "requireTotalCount": true,
                    "searchOperation": "contains",
                    "searchValue": null,
                    "skip": 0,
                    "sort": null,
                    "take": 15,
                }),
            )
            .await?;

        parser::parse_schedule_rows(rows)
    }

    /// Gets the assignments from the calendar as currently served (the
    /// portal defaults to the present month).
    ///
    /// # Returns
    /// The assignments on the calendar.
    pub async fn assignments(&self) -> Result<Vec<Assignment>> {
        let page = self.get_text(CALENDAR_PAGE).await?;
        parser::parse_calendar_page(&page)
    }

    /// Gets the assignments for a specific month, by re-posting the
    /// calendar form with the month field set.
    ///
    /// # Parameters
    /// - `month`: The month to fetch, `1..=12`.
    /// - `year`: The year to fetch.
    ///
    /// # Returns
    /// The assignments due in that month.
    pub async fn assignments_for(&self, month: u32, year: i32) -> Result<Vec<Assignment>> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidInput("month", "must be between 1 and 12"));
        }

        let page = self.get_text(CALENDAR_PAGE).await?;
        let mut fields = parser::parse_aspnet_form(&page)?;
        fields.insert(
            CALENDAR_MONTH_FIELD.to_string(),
            format!("{month}/1/{year}"),
        );

        let url = self.data.url(CALENDAR_PAGE)?;
        debug!(%url, month, year, "re-posting calendar form");
        let resp = check_status(
            self.data
                .req(ReqType::Post(url))
                .form(&fields)
                .send()
                .await?,
        )?;
        let page = resp.text().await?;

        parser::parse_calendar_page(&page)
    }

    /// Gets miscellaneous student information, keyed by the labels the
    /// portal renders (districts customize these).
    pub async fn student_info(&self) -> Result<StudentInfo> {
        let page = self.get_text(STUDENT_INFO_PAGE).await?;
        parser::parse_student_info_page(&page)
    }

    /// Gets miscellaneous school information. Staff cells come back as
    /// contacts; everything else as text.
    pub async fn school_info(&self) -> Result<SchoolInfo> {
        let page = self.get_text(SCHOOL_INFO_PAGE).await?;
        parser::parse_school_info_page(&page)
    }

    /// Gets the school's grading periods from the gradebook's period
    /// selector.
    pub async fn grading_periods(&self) -> Result<Vec<GradingPeriod>> {
        let page = self.get_text(GRADE_BOOK_PAGE).await?;
        parser::parse_grading_periods(&page)
    }

    /// Gets the gradebook: each course with its marking periods, marks,
    /// and scores.
    ///
    /// # Parameters
    /// - `grading_period`: If provided, the gradebook is re-loaded for the
    ///   grading period with this display name (e.g. `Quarter 2`) instead
    ///   of the portal's default.
    ///
    /// # Returns
    /// The gradebook entries.
    pub async fn gradebook(&self, grading_period: Option<&str>) -> Result<Vec<GradeBookEntry>> {
        let page = self.get_text(GRADE_BOOK_PAGE).await?;

        match grading_period {
            None => parser::parse_gradebook_page(&page),
            Some(name) => {
                let periods = parser::parse_grading_periods(&page)?;
                let period = periods.iter().find(|p| p.name == name).ok_or(
                    Error::InvalidInput("grading_period", "no grading period with that name"),
                )?;
                let scope = parser::parse_gradebook_scope(&page)?;

                let fragment = self
                    .load_control(&LoadControl::gradebook_classes(&period.period_gu, &scope))
                    .await?;
                parser::parse_gradebook_page(&fragment)
            }
        }
    }

    /// Gets one class's grades for one marking period: the mark, the
    /// percentage score, and every assignment in the grid.
    ///
    /// # Parameters
    /// - `class_name`: The class name to stamp onto the assignments
    ///   (usually the owning [`GradeBookEntry`]'s name).
    /// - `marking_period`: The marking period row, as returned by
    ///   [`StudentVue::gradebook`].
    ///
    /// # Returns
    /// The class's grades.
    pub async fn class_grades(
        &self,
        class_name: &str,
        marking_period: &MarkingPeriod,
    ) -> Result<ClassGrades> {
        let fragment = self
            .load_control(&LoadControl::class_details(marking_period))
            .await?;
        parser::parse_class_grades(&fragment, class_name)
    }

    /// Gets the student's full course history: every school year, split
    /// into semesters, with marks and credits per course.
    pub async fn course_history(&self) -> Result<CourseHistory> {
        let page = self.get_text(COURSE_HISTORY_PAGE).await?;
        parser::parse_course_history_page(&page)
    }

    /// Downloads the student's photo.
    ///
    /// # Returns
    /// The raw image bytes.
    pub async fn photo(&self) -> Result<Vec<u8>> {
        let url = self.data.url(&self.student.photo_path)?;
        debug!(%url, "fetching student photo");
        let resp = check_status(self.data.req(ReqType::Get(url)).send().await?)?;
        Ok(resp.bytes().await?.to_vec())
    }

    /// Fetches a portal page and returns its body.
    async fn get_text(&self, path: &str) -> Result<String> {
        let url = self.data.url(path)?;
        debug!(%url, "fetching portal page");
        let resp = check_status(self.data.req(ReqType::Get(url)).send().await?)?;
        Ok(resp.text().await?)
    }

    /// Posts a `LoadControl` request and returns the rendered HTML
    /// fragment from the response envelope.
    async fn load_control(&self, control: &LoadControl) -> Result<String> {
        let url = self.data.url(LOAD_CONTROL_ENDPOINT)?;
        debug!(control = %control.name, "loading control");
        let resp = check_status(
            self.data
                .req(ReqType::Post(url))
                .json(&control.body())
                .send()
                .await?,
        )?;
        let envelope: RawServiceResponse<RawControlHtml> = resp.json().await?;
        Ok(envelope.d.data.html)
    }

    /// Posts a `DXDataGridRequest` and returns the raw grid rows from the
    /// response envelope.
    async fn data_grid(&self, call: &parser::DataGridCall, load_options: Value) -> Result<Vec<Value>> {
        let url = self.data.url(DATA_GRID_ENDPOINT)?;
        debug!(source = %call.source_name, "loading data grid");
        let resp = check_status(
            self.data
                .req(ReqType::Post(url))
                .json(&data_grid_body(call, load_options))
                .send()
                .await?,
        )?;
        let envelope: RawServiceResponse<RawGridData> = resp.json().await?;
        Ok(envelope.d.data.data)
    }
}

/// Rejects non-success status codes.
fn check_status(resp: Response) -> Result<Response> {
    if !resp.status().is_success() {
        return Err(Error::BadStatusCode(resp.status().as_u16()));
    }
    Ok(resp)
}
