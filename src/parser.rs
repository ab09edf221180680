//! Extractors that turn the portal's server-rendered pages, HTML fragments,
//! and embedded JSON blobs into the clean types in [`crate::types`].
//!
//! Every function here is a pure function of its input text. The portal's
//! markup is externally controlled, undocumented, and versioned, so the
//! extractors validate strictly and fail loudly: anything missing yields
//! [`Error::PageShape`] naming the element or field that was expected,
//! rather than a silently wrong or partial result.

use std::collections::HashMap;

use chrono::NaiveDate;
use scraper::{ElementRef, Html};
use serde_json::Value;
use tracing::warn;

use crate::constants::{CLASS_DETAILS_CONTROL, NO_PHOTO_SRC};
use crate::raw_types::{
    RawAssignmentCell, RawFocusData, RawFocusKeys, RawGradebookRow, RawGridConfig, RawScheduleRow,
    RawTeacherCell,
};
use crate::types::{
    Assignment, Class, ClassGrades, Course, CourseHistory, Error, GradeBookEntry, GradebookScope,
    GradedAssignment, GradingPeriod, InfoValue, MarkingPeriod, Result, SchoolInfo, SchoolYear,
    Student, StudentInfo, Teacher,
};
use crate::util::{self, static_regex, static_selector};

/// The data-grid call a page's client-side JavaScript would make: the
/// server-side data source name plus the opaque grid parameters scraped out
/// of the page's script tag. Feeding these back to the `DXDataGridRequest`
/// endpoint yields the grid rows the page would have rendered.
#[derive(Debug, Clone, PartialEq)]
pub struct DataGridCall {
    /// The `dataSourceTypeName` the script passes to the grid component.
    pub source_name: String,
    /// The `gridParameters` object, passed back verbatim (re-serialized).
    pub parameters: Value,
}

/// Collects every `<input>` name/value pair inside the page's `aspnetForm`.
/// This harvests the hidden session-continuation fields (`__VIEWSTATE` and
/// friends) that must be posted back on any ASPX form submission.
///
/// # Parameters
/// - `html`: The raw page HTML.
///
/// # Returns
/// The form fields, ready to be amended and posted back.
pub fn parse_aspnet_form(html: &str) -> Result<HashMap<String, String>> {
    let doc = Html::parse_document(html);
    let form = doc
        .select(static_selector!("form#aspnetForm"))
        .next()
        .ok_or_else(|| Error::page_shape("`form#aspnetForm` on the page"))?;

    let mut fields = HashMap::new();
    for input in form.select(static_selector!("input")) {
        let Some(name) = input.value().attr("name") else {
            continue;
        };
        let value = input.value().attr("value").unwrap_or_default();
        fields.insert(name.to_string(), value.to_string());
    }

    Ok(fields)
}

/// Parses the student identity block off the home page.
///
/// # Parameters
/// - `html`: The raw home page HTML.
///
/// # Returns
/// The parsed [`Student`].
pub fn parse_home_page(html: &str) -> Result<Student> {
    let doc = Html::parse_document(html);

    let id_text = first_text(
        &doc,
        static_selector!(".student-id"),
        "`.student-id` on the home page",
    )?;
    let id = static_regex!(r"ID:\s*([0-9]+)")
        .captures(&id_text)
        .ok_or_else(|| Error::page_shape("`ID: <number>` text in `.student-id`"))?[1]
        .to_string();

    let name = first_text(
        &doc,
        static_selector!(".student-name"),
        "`.student-name` on the home page",
    )?;
    let school_name = first_text(
        &doc,
        static_selector!(".school"),
        "`.school` on the home page",
    )?;
    let school_phone = first_text(
        &doc,
        static_selector!(".phone"),
        "`.phone` on the home page",
    )?;

    let photo_path = doc
        .select(static_selector!(r#"img[alt="Student Photo"]"#))
        .next()
        .and_then(|img| img.value().attr("src"))
        .ok_or_else(|| Error::page_shape("`img[alt=\"Student Photo\"]` with a src"))?
        .to_string();

    let guid = if photo_path == NO_PHOTO_SRC {
        None
    } else {
        match static_regex!(r"Photos/[A-Z0-9]+/([A-Z0-9-]+)_Photo\.PNG").captures(&photo_path) {
            Some(caps) => Some(caps[1].to_string()),
            None => {
                warn!(src = %photo_path, "student photo src did not carry a GUID");
                None
            }
        }
    };

    Ok(Student {
        id,
        name,
        school_name,
        school_phone,
        photo_path,
        guid,
    })
}

/// Locates the data-grid call in a page's scripts. The schedule page does
/// not render its rows server-side; instead a script instantiates a
/// DevExpress grid with a `dataSourceTypeName` and a `gridParameters`
/// object, and the rows are fetched through the `DXDataGridRequest`
/// endpoint.
///
/// A page with no grid call at all is not an error: the portal renders the
/// schedule page that way when the student has no classes, so `None` is
/// returned and the caller should treat the grid as empty.
///
/// # Parameters
/// - `html`: The raw page HTML.
///
/// # Returns
/// The grid call, or `None` when the page carries no grid.
pub fn parse_data_grid_call(html: &str) -> Result<Option<DataGridCall>> {
    let doc = Html::parse_document(html);
    let name_re = static_regex!(r"dataSourceTypeName\s*:\s*'([^']+)'");

    // The grid call lives in the last matching script; earlier scripts are
    // unrelated page plumbing.
    let script_text = doc
        .select(static_selector!(r#"script[type="text/javascript"]"#))
        .map(|script| script.text().collect::<String>())
        .filter(|text| name_re.is_match(text))
        .last();

    let Some(script_text) = script_text else {
        return Ok(None);
    };

    let source_name = name_re
        .captures(&script_text)
        .map(|caps| caps[1].to_string())
        .unwrap_or_default();

    let params_text = static_regex!(r"(?s)gridParameters\s*:\s*JSON\.stringify\((\{.*?\})\s*\)")
        .captures(&script_text)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| Error::page_shape("`gridParameters: JSON.stringify({...})` in the grid script"))?;

    let parameters: Value = serde_json::from_str(&params_text)
        .map_err(|e| Error::page_shape(format!("valid JSON grid parameters ({e})")))?;

    Ok(Some(DataGridCall {
        source_name,
        parameters,
    }))
}

/// Converts class schedule grid rows into [`Class`] records. The `Teacher`
/// cell of each row is itself a JSON string and is decoded here.
///
/// # Parameters
/// - `rows`: The raw rows from the data-grid response.
///
/// # Returns
/// The parsed classes, in grid order.
pub fn parse_schedule_rows(rows: Vec<Value>) -> Result<Vec<Class>> {
    let mut classes = Vec::with_capacity(rows.len());
    for row in rows {
        let row: RawScheduleRow = serde_json::from_value(row)
            .map_err(|e| Error::page_shape(format!("a well-formed schedule grid row ({e})")))?;

        let teacher: RawTeacherCell = serde_json::from_str(&row.teacher)
            .map_err(|e| Error::page_shape(format!("teacher JSON in a schedule row ({e})")))?;

        let period = row
            .period
            .as_u32()
            .ok_or_else(|| Error::page_shape("a numeric `Period` in a schedule row"))?;

        classes.push(Class {
            period,
            name: row.course_title,
            room: row.room_name.to_string(),
            teacher: Teacher {
                name: teacher.teacher_name,
                email: teacher.email,
            },
            class_id: row.id.to_string(),
        });
    }

    Ok(classes)
}

/// Parses the assignments off a calendar page. Each assignment is an
/// anchor wired to the `Gradebook_AssignmentDetails` control; its href
/// query string carries the assignment ID (`DGU`), grading period (`GP`),
/// and org-year (`SSY`), and the enclosing day cell carries the date in a
/// `ChangeView('2', 'MM/DD/YYYY')` onclick handler.
///
/// # Parameters
/// - `html`: The raw calendar page HTML.
///
/// # Returns
/// The assignments visible on the calendar, in page order.
pub fn parse_calendar_page(html: &str) -> Result<Vec<Assignment>> {
    let doc = Html::parse_document(html);
    let mut assignments = vec![];

    for link in doc.select(static_selector!(
        r#"a[data-control="Gradebook_AssignmentDetails"]"#
    )) {
        let href = link
            .value()
            .attr("href")
            .ok_or_else(|| Error::page_shape("an href on an assignment link"))?;
        let query = util::query_pairs(href);

        let text = link.text().collect::<String>();
        let (class_name, rest) = text
            .split_once(':')
            .ok_or_else(|| Error::page_shape("`Class : Assignment` text on an assignment link"))?;
        let name = static_regex!(r"- Score:.+")
            .replace(rest, "")
            .trim()
            .to_string();

        // The day cell two levels up holds the date picker for this day.
        let day_cell = link
            .parent()
            .and_then(|p| p.parent())
            .and_then(ElementRef::wrap)
            .ok_or_else(|| Error::page_shape("a day cell enclosing an assignment link"))?;
        let onclick = day_cell
            .select(static_selector!("span.datePick"))
            .next()
            .and_then(|span| span.value().attr("onclick"))
            .ok_or_else(|| {
                Error::page_shape("`span.datePick` with an onclick in the assignment's day cell")
            })?;
        let date_text = static_regex!(r"ChangeView\('2',\s*'([0-9/]+)'\)")
            .captures(onclick)
            .ok_or_else(|| Error::page_shape("`ChangeView('2', 'MM/DD/YYYY')` in a datePick"))?[1]
            .to_string();
        let due_date = NaiveDate::parse_from_str(&date_text, "%m/%d/%Y")
            .map_err(|e| Error::page_shape(format!("a MM/DD/YYYY date in a datePick ({e})")))?;

        let assignment_id = query
            .get("DGU")
            .and_then(|v| v.parse().ok())
            .ok_or_else(|| Error::page_shape("a numeric `DGU` in an assignment href"))?;
        let grading_period = query
            .get("GP")
            .ok_or_else(|| Error::page_shape("`GP` in an assignment href"))?
            .clone();
        let org_year_gu = query
            .get("SSY")
            .ok_or_else(|| Error::page_shape("`SSY` in an assignment href"))?
            .clone();

        assignments.push(Assignment {
            name,
            class_name: class_name.trim().to_string(),
            due_date,
            assignment_id,
            grading_period,
            org_year_gu,
        });
    }

    Ok(assignments)
}

/// Parses the student info table. Each cell leads with a label span; the
/// rest of the cell is the value, with element boundaries preserved as
/// line breaks (addresses span several lines).
pub fn parse_student_info_page(html: &str) -> Result<StudentInfo> {
    let doc = Html::parse_document(html);
    let table = doc
        .select(static_selector!("table.info_tbl"))
        .next()
        .ok_or_else(|| Error::page_shape("`table.info_tbl` on the account page"))?;

    let mut info = HashMap::new();
    for cell in table.select(static_selector!("td")) {
        let label_el = cell
            .select(static_selector!("span"))
            .next()
            .ok_or_else(|| Error::page_shape("a label span in an account page cell"))?;
        let label = text_of(label_el);
        info.insert(label, cell_text_excluding(cell, label_el));
    }

    Ok(info)
}

/// Parses the school info table. Same layout as the student info table,
/// except that a cell holding a second span is a staff contact whose email
/// hides in a (possibly `javascript:`-wrapped) mailto link.
pub fn parse_school_info_page(html: &str) -> Result<SchoolInfo> {
    let doc = Html::parse_document(html);
    let table = doc
        .select(static_selector!("table"))
        .next()
        .ok_or_else(|| Error::page_shape("a table on the school info page"))?;

    let mut info = HashMap::new();
    for cell in table.select(static_selector!("td")) {
        let spans: Vec<ElementRef> = cell.select(static_selector!("span")).collect();
        let label_el = *spans
            .first()
            .ok_or_else(|| Error::page_shape("a label span in a school info cell"))?;
        let label = text_of(label_el);

        let value = if spans.len() == 1 {
            InfoValue::Text(cell_text_excluding(cell, label_el))
        } else {
            let contact = spans[1];
            let name = text_of(contact);
            let href = contact
                .select(static_selector!("a"))
                .next()
                .and_then(|a| a.value().attr("href"))
                .ok_or_else(|| Error::page_shape("a mailto link in a school info contact cell"))?;
            let email = util::extract_email(href).unwrap_or_else(|| href.to_string());
            InfoValue::Contact(Teacher { name, email })
        };

        info.insert(label, value);
    }

    Ok(info)
}

/// Parses the grading period selector off the gradebook page.
///
/// # Parameters
/// - `html`: The raw gradebook page HTML.
///
/// # Returns
/// The grading periods, in dropdown order.
pub fn parse_grading_periods(html: &str) -> Result<Vec<GradingPeriod>> {
    let doc = Html::parse_document(html);
    let dropdown = doc
        .select(static_selector!("ul.dropdown-menu"))
        .next()
        .ok_or_else(|| Error::page_shape("`ul.dropdown-menu` on the gradebook page"))?;

    let mut periods = vec![];
    for link in dropdown.select(static_selector!("a")) {
        let period_gu = link
            .value()
            .attr("data-period-id")
            .ok_or_else(|| Error::page_shape("`data-period-id` on a grading period link"))?;
        periods.push(GradingPeriod {
            name: text_of(link),
            period_gu: period_gu.to_string(),
        });
    }

    Ok(periods)
}

/// Parses the school-year scope off the gradebook page's update panel.
/// These values are required to re-load the gradebook for a non-default
/// grading period.
pub fn parse_gradebook_scope(html: &str) -> Result<GradebookScope> {
    let doc = Html::parse_document(html);
    let panel = doc
        .select(static_selector!("div.update-panel"))
        .next()
        .ok_or_else(|| Error::page_shape("`div.update-panel` on the gradebook page"))?;

    let org_year_gu = panel
        .value()
        .attr("data-orgyear-id")
        .ok_or_else(|| Error::page_shape("`data-orgyear-id` on the update panel"))?
        .to_string();
    let school_id = panel
        .value()
        .attr("data-school-id")
        .ok_or_else(|| Error::page_shape("`data-school-id` on the update panel"))?
        .to_string();

    Ok(GradebookScope {
        org_year_gu,
        school_id,
    })
}

/// Parses the gradebook course list: one entry per course, each with its
/// marking period rows. Course rows and their marking period rows are
/// different `<tr>`s tied together by a shared `data-guid`.
///
/// # Parameters
/// - `html`: The raw gradebook page, or the `Gradebook_SchoolClasses`
///   fragment when a specific grading period was requested.
///
/// # Returns
/// The gradebook entries, in page order.
pub fn parse_gradebook_page(html: &str) -> Result<Vec<GradeBookEntry>> {
    let doc = Html::parse_document(html);
    let tbody = doc
        .select(static_selector!("tbody"))
        .next()
        .ok_or_else(|| Error::page_shape("a course table body on the gradebook page"))?;

    let mut entries = vec![];
    for button in tbody.select(static_selector!("button.btn.btn-link.course-title")) {
        let button_text = button.text().collect::<String>();
        let name = static_regex!(r"^[0-9]+:\s*(.+)$")
            .captures(button_text.trim())
            .ok_or_else(|| Error::page_shape("`NN: Course Name` text on a course button"))?[1]
            .to_string();

        let row = button
            .parent()
            .and_then(|p| p.parent())
            .and_then(ElementRef::wrap)
            .ok_or_else(|| Error::page_shape("a row enclosing a course button"))?;
        let guid = row
            .value()
            .attr("data-guid")
            .ok_or_else(|| Error::page_shape("`data-guid` on a gradebook course row"))?;

        let mut marking_periods = vec![];
        for tr in tbody.select(static_selector!("tr[data-mark-gu]")) {
            if tr.value().attr("data-guid") != Some(guid) {
                continue;
            }

            let mp_button = tr
                .select(static_selector!("button.course-markperiod"))
                .next()
                .ok_or_else(|| Error::page_shape("a marking period button in a mark row"))?;
            let mark = tr
                .select(static_selector!("span.mark"))
                .next()
                .map(text_of)
                .ok_or_else(|| Error::page_shape("`span.mark` in a mark row"))?;
            let score = tr
                .select(static_selector!("span.score"))
                .next()
                .map(text_of)
                .ok_or_else(|| Error::page_shape("`span.score` in a mark row"))?;

            let focus_raw = mp_button
                .value()
                .attr("data-focus")
                .ok_or_else(|| Error::page_shape("`data-focus` on a marking period button"))?;
            let focus: RawFocusData = serde_json::from_str(focus_raw).map_err(|e| {
                Error::page_shape(format!("valid `data-focus` JSON on a marking period ({e})"))
            })?;

            marking_periods.push(MarkingPeriod {
                name: text_of(mp_button),
                mark,
                score,
                control_name: focus
                    .load_params
                    .map(|p| p.control_name)
                    .unwrap_or_else(|| CLASS_DETAILS_CONTROL.to_string()),
                focus_args: focus.focus_args,
            });
        }

        entries.push(GradeBookEntry {
            name,
            marking_periods,
        });
    }

    Ok(entries)
}

/// Parses a `Gradebook_ClassDetails` fragment into one class's grades.
///
/// The assignment grid is not in the fragment's markup; it rides in a
/// `PXP.DevExpress.ExtendGridConfiguration({...})` script blob. The blob
/// is almost JSON — it references client-side template functions as bare
/// `PXP.DataGridTemplates.X` / `PXP.DevExpress.X` identifiers — so those
/// identifiers are quoted first and the result is decoded as JSON. Each
/// row then nests further JSON strings (see [`RawGradebookRow`]).
///
/// # Parameters
/// - `html`: The control's HTML fragment.
/// - `class_name`: The class name to stamp onto each assignment.
///
/// # Returns
/// The class's mark, score, and assignments.
pub fn parse_class_grades(html: &str, class_name: &str) -> Result<ClassGrades> {
    let doc = Html::parse_fragment(html);

    let mark = doc
        .select(static_selector!("div.mark"))
        .next()
        .map(text_of)
        .ok_or_else(|| Error::page_shape("`div.mark` in the class details fragment"))?;
    let score_text = doc
        .select(static_selector!("div.score"))
        .next()
        .map(text_of)
        .ok_or_else(|| Error::page_shape("`div.score` in the class details fragment"))?;
    let score: f64 = score_text
        .trim_end_matches('%')
        .trim()
        .parse()
        .map_err(|_| Error::page_shape("a percentage in `div.score`"))?;

    let script_text = doc
        .select(static_selector!(r#"script[type="text/javascript"]"#))
        .last()
        .map(|script| script.text().collect::<String>())
        .ok_or_else(|| Error::page_shape("a script in the class details fragment"))?;

    let blob = static_regex!(r"(?s)PXP\.DevExpress\.ExtendGridConfiguration\(\s*(\{.+\})\s*\)")
        .captures(&script_text)
        .ok_or_else(|| Error::page_shape("an `ExtendGridConfiguration({...})` call"))?[1]
        .to_string();

    // Quote the bare template identifiers so the blob parses as JSON.
    let quoted = static_regex!(r"PXP\.(?:DataGridTemplates|DevExpress)\.([A-Za-z]+)")
        .replace_all(&blob, "\"$1\"");
    let config: RawGridConfig = serde_json::from_str(&quoted)
        .map_err(|e| Error::page_shape(format!("a JSON-decodable grid configuration ({e})")))?;

    let mut assignments = Vec::with_capacity(config.data_source.len());
    for row in config.data_source {
        assignments.push(parse_graded_assignment(row, class_name)?);
    }

    Ok(ClassGrades {
        mark,
        score,
        assignments,
    })
}

fn parse_graded_assignment(row: RawGradebookRow, class_name: &str) -> Result<GradedAssignment> {
    let cell: RawAssignmentCell = serde_json::from_str(&row.gb_assignment)
        .map_err(|e| Error::page_shape(format!("`GBAssignment` JSON in a grid row ({e})")))?;

    let focus_text = static_regex!(r"data-focus=(\{.+\})")
        .captures(&cell.href_attributes)
        .ok_or_else(|| Error::page_shape("`data-focus={...}` in an assignment's hrefAttributes"))?
        [1]
        .to_string();
    let focus: RawFocusData = serde_json::from_str(&focus_text)
        .map_err(|e| Error::page_shape(format!("valid assignment `data-focus` JSON ({e})")))?;
    let keys: RawFocusKeys = serde_json::from_value(focus.focus_args).map_err(|e| {
        Error::page_shape(format!("`gradePeriodGU`/`OrgYearGU` focus arguments ({e})"))
    })?;

    let date = NaiveDate::parse_from_str(&row.date, "%m/%d/%Y")
        .map_err(|e| Error::page_shape(format!("a MM/DD/YYYY `Date` in a grid row ({e})")))?;
    let assignment_id = row
        .grade_book_id
        .as_i64()
        .ok_or_else(|| Error::page_shape("a numeric `gradeBookId` in a grid row"))?;
    let (score, max_score) = parse_points(&row.gb_points)?;

    Ok(GradedAssignment {
        name: cell.value,
        class_name: class_name.to_string(),
        date,
        assignment_id,
        grade_period_gu: keys.grade_period_gu,
        org_year_gu: keys.org_year_gu,
        score,
        max_score,
    })
}

/// Parses a `GBPoints` cell. Graded work reads `earned/possible`; ungraded
/// work reads `N Points Possible`.
fn parse_points(points: &str) -> Result<(Option<f64>, f64)> {
    let points = points.trim();
    if let Some(possible) = points.strip_suffix("Points Possible") {
        let max = possible
            .trim()
            .parse()
            .map_err(|_| Error::page_shape("a numeric `N Points Possible` cell"))?;
        return Ok((None, max));
    }

    let (earned, possible) = points
        .split_once('/')
        .ok_or_else(|| Error::page_shape("an `earned/possible` points cell"))?;
    let score = earned
        .trim()
        .parse()
        .map_err(|_| Error::page_shape("a numeric earned-points value"))?;
    let max = possible
        .trim()
        .parse()
        .map_err(|_| Error::page_shape("a numeric possible-points value"))?;
    Ok((Some(score), max))
}

/// Parses the course history page: an `<h2>` label per school year, each
/// followed by a table whose `<tbody>` groups are semesters.
///
/// # Parameters
/// - `html`: The raw course history page HTML.
///
/// # Returns
/// The course history, in page order (most recent year first).
pub fn parse_course_history_page(html: &str) -> Result<CourseHistory> {
    let doc = Html::parse_document(html);
    let wrapper = doc
        .select(static_selector!("div.chs-course-history"))
        .next()
        .ok_or_else(|| Error::page_shape("`div.chs-course-history` on the course history page"))?;
    let inner = wrapper
        .select(static_selector!("div"))
        .next()
        .ok_or_else(|| Error::page_shape("an inner div in the course history wrapper"))?;

    let labels: Vec<ElementRef> = inner.select(static_selector!("h2")).collect();
    let tables: Vec<ElementRef> = inner.select(static_selector!("table")).collect();
    if labels.len() != tables.len() {
        return Err(Error::page_shape(format!(
            "one year label per table ({} labels, {} tables)",
            labels.len(),
            tables.len()
        )));
    }

    let mut history = vec![];
    for (label, table) in labels.into_iter().zip(tables) {
        // The year text is the label's trailing text node; earlier nodes
        // are icon markup.
        let year = label
            .text()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .last()
            .ok_or_else(|| Error::page_shape("year text in a course history heading"))?
            .to_string();

        let mut semesters = vec![];
        for tbody in table.select(static_selector!("tbody")) {
            let mut courses = vec![];
            for tr in tbody.select(static_selector!("tr")) {
                // Header rows carry <th> cells; course rows carry <td>.
                if tr.select(static_selector!("th")).next().is_some() {
                    continue;
                }
                let cells: Vec<String> = tr.select(static_selector!("td")).map(text_of).collect();
                if cells.len() < 4 {
                    return Err(Error::page_shape(
                        "four cells (course, mark, attempted, completed) in a course row",
                    ));
                }

                courses.push(Course {
                    name: cells[0].clone(),
                    mark: cells[1].clone(),
                    credits_attempted: cells[2]
                        .parse()
                        .map_err(|_| Error::page_shape("numeric attempted credits"))?,
                    credits_completed: cells[3]
                        .parse()
                        .map_err(|_| Error::page_shape("numeric completed credits"))?,
                });
            }
            semesters.push(courses);
        }

        history.push(SchoolYear { year, semesters });
    }

    Ok(history)
}

/// The element's text content, whitespace-trimmed.
fn text_of(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// The cell's text with the label element's text removed and the remaining
/// text nodes joined by line breaks (the portal uses markup boundaries to
/// lay out multi-line values such as addresses).
fn cell_text_excluding(cell: ElementRef, excluded: ElementRef) -> String {
    let mut parts: Vec<&str> = vec![];
    for node in cell.descendants() {
        if let Some(text) = node.value().as_text() {
            if node.ancestors().any(|a| a.id() == excluded.id()) {
                continue;
            }
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                parts.push(trimmed);
            }
        }
    }
    parts.join("\n")
}

/// Finds the first element matching `selector` and returns its text, or a
/// page-shape error built from `expected`.
fn first_text(doc: &Html, selector: &scraper::Selector, expected: &str) -> Result<String> {
    doc.select(selector)
        .next()
        .map(text_of)
        .ok_or_else(|| Error::page_shape(expected.to_string()))
}
