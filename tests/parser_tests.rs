#[cfg(test)]
mod form_tests {
    use studentvue::parser::parse_aspnet_form;
    use studentvue::types::Error;

    #[test]
    pub fn test_harvests_hidden_fields() {
        let html = include_str!("html/login.html");
        let fields = parse_aspnet_form(html).unwrap();

        assert_eq!("dDwtMTg3O08ga2pXbGz=", fields["__VIEWSTATE"]);
        assert_eq!("9A0B0A92", fields["__VIEWSTATEGENERATOR"]);
        assert_eq!("aBcDeF9z==", fields["__EVENTVALIDATION"]);

        // The credential fields exist but carry no value yet.
        assert_eq!("", fields["ctl00$MainContent$username"]);
        assert_eq!("", fields["ctl00$MainContent$password"]);
        assert_eq!("Login", fields["ctl00$MainContent$Submit1"]);

        // Nameless inputs are not form data.
        assert_eq!(6, fields.len());
    }

    #[test]
    pub fn test_missing_form_fails_loudly() {
        let err = parse_aspnet_form("<html><body><p>maintenance</p></body></html>").unwrap_err();
        assert!(matches!(err, Error::PageShape(_)));
    }
}

#[cfg(test)]
mod home_tests {
    use studentvue::parser::parse_home_page;
    use studentvue::types::Error;

    #[test]
    pub fn test_student_identity() {
        let student = parse_home_page(include_str!("html/home.html")).unwrap();

        assert_eq!("904312", student.id);
        assert_eq!("Jordan Maxwell", student.name);
        assert_eq!("Springfield High School", student.school_name);
        assert_eq!("555-0100", student.school_phone);
        assert_eq!(
            "Photos/SPR01/A1B2C3D4-E5F6-7890-ABCD-EF1234567890_Photo.PNG",
            student.photo_path
        );
        assert_eq!(
            Some("A1B2C3D4-E5F6-7890-ABCD-EF1234567890".to_string()),
            student.guid
        );
    }

    #[test]
    pub fn test_placeholder_photo_has_no_guid() {
        let student = parse_home_page(include_str!("html/home_no_photo.html")).unwrap();
        assert_eq!("Casey Brooks", student.name);
        assert_eq!("Images/PXP/NoPhoto.png", student.photo_path);
        assert_eq!(None, student.guid);
    }

    #[test]
    pub fn test_reshaped_page_fails_loudly() {
        let err = parse_home_page("<html><body></body></html>").unwrap_err();
        assert!(matches!(err, Error::PageShape(_)));
    }
}

#[cfg(test)]
mod schedule_tests {
    use serde_json::{json, Value};
    use studentvue::parser::{parse_data_grid_call, parse_schedule_rows};

    #[test]
    pub fn test_grid_call_extraction() {
        let call = parse_data_grid_call(include_str!("html/schedule.html"))
            .unwrap()
            .expect("the schedule page carries a grid call");

        assert_eq!("ClassScheduleData", call.source_name);
        assert_eq!(
            json!({"SchoolID": "123", "StudentGU": "ST-GUID", "TermIndex": 0}),
            call.parameters
        );
    }

    #[test]
    pub fn test_page_without_grid_means_empty_schedule() {
        let call = parse_data_grid_call(include_str!("html/schedule_empty.html")).unwrap();
        assert!(call.is_none());
    }

    #[test]
    pub fn test_rows_to_classes() {
        let rows: Vec<Value> =
            serde_json::from_str(include_str!("json/schedule_rows.json")).unwrap();
        let classes = parse_schedule_rows(rows).unwrap();

        assert_eq!(2, classes.len());

        assert_eq!(1, classes[0].period);
        assert_eq!("AP Biology", classes[0].name);
        assert_eq!("207", classes[0].room);
        assert_eq!("Imelda Hartman", classes[0].teacher.name);
        assert_eq!("ihartman@springfield.k12.ca.us", classes[0].teacher.email);
        assert_eq!("4501", classes[0].class_id);

        assert_eq!(2, classes[1].period);
        assert_eq!("Annex B", classes[1].room);
        assert_eq!("Ray Delgado", classes[1].teacher.name);
    }
}

#[cfg(test)]
mod calendar_tests {
    use chrono::NaiveDate;
    use studentvue::parser::parse_calendar_page;
    use studentvue::types::Error;

    #[test]
    pub fn test_assignments() {
        let assignments = parse_calendar_page(include_str!("html/calendar.html")).unwrap();
        assert_eq!(2, assignments.len());

        let first = &assignments[0];
        assert_eq!("Cell Lab Report", first.name);
        assert_eq!("AP Biology", first.class_name);
        assert_eq!(NaiveDate::from_ymd_opt(2019, 10, 3).unwrap(), first.due_date);
        assert_eq!(5501, first.assignment_id);
        assert_eq!("GP1-GUID", first.grading_period);
        assert_eq!("OY-GUID", first.org_year_gu);

        let second = &assignments[1];
        assert_eq!("Reading Response 4", second.name);
        assert_eq!("English 10", second.class_name);
        assert_eq!(NaiveDate::from_ymd_opt(2019, 10, 7).unwrap(), second.due_date);
        assert_eq!(5512, second.assignment_id);
    }

    #[test]
    pub fn test_missing_date_picker_fails_loudly() {
        let html = r#"
            <div class="calendar-day">
                <div class="event">
                    <a data-control="Gradebook_AssignmentDetails"
                       href="PXP2_Gradebook.aspx?AGU=0&amp;DGU=1&amp;GP=g&amp;SSY=s">Math : HW 1</a>
                </div>
            </div>"#;
        let err = parse_calendar_page(html).unwrap_err();
        assert!(matches!(err, Error::PageShape(_)));
    }
}

#[cfg(test)]
mod info_tests {
    use studentvue::parser::{parse_school_info_page, parse_student_info_page};
    use studentvue::types::{InfoValue, Teacher};

    #[test]
    pub fn test_student_info_labels_and_values() {
        let info = parse_student_info_page(include_str!("html/student_info.html")).unwrap();

        assert_eq!(4, info.len());
        assert_eq!("Jordan Maxwell", info["Student Name"]);
        assert_eq!("904312", info["Student ID"]);
        assert_eq!("555-0199", info["Home Phone"]);
        // Markup boundaries in multi-line values become line breaks.
        assert_eq!("12 Oak Lane\nSpringfield, CA 90000", info["Mailing Address"]);
    }

    #[test]
    pub fn test_school_info_with_contact_cell() {
        let info = parse_school_info_page(include_str!("html/school_info.html")).unwrap();

        assert_eq!(4, info.len());
        assert_eq!(
            InfoValue::Text("Springfield High School".to_string()),
            info["School Name"]
        );
        assert_eq!(
            InfoValue::Text("500 College Ave\nSpringfield, CA 90000".to_string()),
            info["Address"]
        );
        assert_eq!(InfoValue::Text("555-0100".to_string()), info["Phone"]);
        assert_eq!(
            InfoValue::Contact(Teacher {
                name: "Leona Monroe".to_string(),
                email: "lmonroe@springfield.k12.ca.us".to_string(),
            }),
            info["Principal"]
        );
    }
}

#[cfg(test)]
mod gradebook_tests {
    use studentvue::parser::{
        parse_gradebook_page, parse_gradebook_scope, parse_grading_periods,
    };

    #[test]
    pub fn test_grading_periods() {
        let periods = parse_grading_periods(include_str!("html/gradebook.html")).unwrap();

        assert_eq!(2, periods.len());
        assert_eq!("Quarter 1", periods[0].name);
        assert_eq!("GP1-GUID", periods[0].period_gu);
        assert_eq!("Quarter 2", periods[1].name);
        assert_eq!("GP2-GUID", periods[1].period_gu);
    }

    #[test]
    pub fn test_scope_from_update_panel() {
        let scope = parse_gradebook_scope(include_str!("html/gradebook.html")).unwrap();
        assert_eq!("OY-GUID", scope.org_year_gu);
        assert_eq!("123", scope.school_id);
    }

    #[test]
    pub fn test_courses_and_marking_periods() {
        let entries = parse_gradebook_page(include_str!("html/gradebook.html")).unwrap();

        assert_eq!(2, entries.len());

        let biology = &entries[0];
        assert_eq!("AP Biology", biology.name);
        assert_eq!(2, biology.marking_periods.len());

        let q1 = &biology.marking_periods[0];
        assert_eq!("Quarter 1", q1.name);
        assert_eq!("A", q1.mark);
        assert_eq!("95.2%", q1.score);
        assert_eq!("Gradebook_ClassDetails", q1.control_name);
        assert_eq!("GP1-GUID", q1.focus_args["gradePeriodGU"]);
        assert_eq!(4501, q1.focus_args["classID"]);

        let q2 = &biology.marking_periods[1];
        assert_eq!("Quarter 2", q2.name);
        assert_eq!("A-", q2.mark);
        assert_eq!("GP2-GUID", q2.focus_args["gradePeriodGU"]);

        let english = &entries[1];
        assert_eq!("English 10", english.name);
        assert_eq!(1, english.marking_periods.len());
        assert_eq!("B+", english.marking_periods[0].mark);
        assert_eq!("88.4%", english.marking_periods[0].score);
        assert_eq!(4502, english.marking_periods[0].focus_args["classID"]);
    }
}

#[cfg(test)]
mod class_details_tests {
    use chrono::NaiveDate;
    use studentvue::parser::parse_class_grades;
    use studentvue::types::Error;

    #[test]
    pub fn test_mark_score_and_assignments() {
        let grades =
            parse_class_grades(include_str!("html/class_details.html"), "AP Biology").unwrap();

        assert_eq!("A-", grades.mark);
        assert_eq!(92.4, grades.score);
        assert_eq!(2, grades.assignments.len());

        let lab = &grades.assignments[0];
        assert_eq!("Cell Lab Report", lab.name);
        assert_eq!("AP Biology", lab.class_name);
        assert_eq!(NaiveDate::from_ymd_opt(2019, 9, 20).unwrap(), lab.date);
        assert_eq!(7701, lab.assignment_id);
        assert_eq!("GP1-GUID", lab.grade_period_gu);
        assert_eq!("OY-GUID", lab.org_year_gu);
        assert_eq!(Some(18.0), lab.score);
        assert_eq!(20.0, lab.max_score);

        // Ungraded work shows up with no score but a max.
        let quiz = &grades.assignments[1];
        assert_eq!("Chapter 5 Reading Quiz", quiz.name);
        assert_eq!(7742, quiz.assignment_id);
        assert_eq!(None, quiz.score);
        assert_eq!(20.0, quiz.max_score);
    }

    #[test]
    pub fn test_fragment_without_grid_fails_loudly() {
        let html = r#"<div class="mark">A</div><div class="score">90%</div>"#;
        let err = parse_class_grades(html, "Math").unwrap_err();
        assert!(matches!(err, Error::PageShape(_)));
    }
}

#[cfg(test)]
mod course_history_tests {
    use studentvue::parser::parse_course_history_page;
    use studentvue::types::Error;

    #[test]
    pub fn test_years_semesters_courses() {
        let history =
            parse_course_history_page(include_str!("html/course_history.html")).unwrap();

        assert_eq!(2, history.len());

        let sophomore = &history[0];
        assert_eq!("2019-2020 (Grade 10)", sophomore.year);
        assert_eq!(2, sophomore.semesters.len());
        assert_eq!(2, sophomore.semesters[0].len());

        let biology = &sophomore.semesters[0][0];
        assert_eq!("AP Biology", biology.name);
        assert_eq!("A", biology.mark);
        assert_eq!(5.0, biology.credits_attempted);
        assert_eq!(5.0, biology.credits_completed);

        assert_eq!("English 10", sophomore.semesters[0][1].name);
        assert_eq!("A-", sophomore.semesters[1][0].mark);

        let freshman = &history[1];
        assert_eq!("2018-2019 (Grade 9)", freshman.year);
        assert_eq!(1, freshman.semesters.len());
        assert_eq!("Biology", freshman.semesters[0][0].name);
    }

    #[test]
    pub fn test_missing_wrapper_fails_loudly() {
        let err = parse_course_history_page("<html><body></body></html>").unwrap_err();
        assert!(matches!(err, Error::PageShape(_)));
    }
}
