use super::*;

fn signup() -> SignupForm {
    SignupForm {
        name: "Ada Obi".to_owned(),
        email: "ada@example.com".to_owned(),
        password: "correct-horse".to_owned(),
        confirm_password: "correct-horse".to_owned(),
        institution_id: Some(3),
        areas_of_interest: vec!["genomics".to_owned()],
    }
}

fn pdf() -> FilePart {
    FilePart { file_name: "paper.pdf".to_owned(), content_type: "application/pdf".to_owned(), bytes: vec![0x25, 0x50] }
}

fn upload() -> UploadForm {
    UploadForm {
        title: " Soil carbon ".to_owned(),
        abstract_text: "We measured soil.".to_owned(),
        category_id: "2".to_owned(),
        field_id: "5".to_owned(),
        keywords: vec!["soil".to_owned()],
        new_keywords: Vec::new(),
        notes: String::new(),
        file: Some(pdf()),
    }
}

// =============================================================
// FieldErrors
// =============================================================

#[test]
fn field_errors_keep_first_message_per_field() {
    let mut errors = FieldErrors::default();
    errors.insert(fields::EMAIL, "first");
    errors.insert(fields::EMAIL, "second");
    assert_eq!(errors.get(fields::EMAIL), Some("first"));
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.to_string(), "first");
}

#[test]
fn validation_report_maps_struct_fields_to_error_keys() {
    let report = SignupForm { confirm_password: "other".to_owned(), ..signup() }.validate().unwrap_err();
    let errors = FieldErrors::from(report);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(fields::CONFIRM_PASSWORD), Some("Passwords don't match"));
    assert_eq!(errors.get("confirm_password"), None);
}

#[test]
fn blank_email_reports_required_before_format() {
    let errors = ForgotPasswordForm { email: "   ".to_owned() }.parse().unwrap_err();
    assert_eq!(errors.get(fields::EMAIL), Some("Email is required"));
}

#[test]
fn empty_field_errors_pass_value_through() {
    assert_eq!(FieldErrors::default().into_result(5), Ok(5));
}

// =============================================================
// Login
// =============================================================

#[test]
fn login_trims_email_and_requires_password() {
    let errors = LoginForm { email: "ada@example.com".to_owned(), password: String::new() }
        .parse()
        .unwrap_err();
    assert_eq!(errors.get(fields::PASSWORD), Some("Password is required"));
    assert_eq!(errors.get(fields::EMAIL), None);

    let request = LoginForm { email: "  ada@example.com ".to_owned(), password: "pw".to_owned() }
        .parse()
        .unwrap();
    assert_eq!(request.email, "ada@example.com");
}

#[test]
fn login_rejects_malformed_email() {
    for email in ["ada", "ada@", "@example.com", "a b@example.com", "ada@@example.com"] {
        let form = LoginForm { email: email.to_owned(), password: "pw".to_owned() };
        assert!(form.parse().is_err(), "{email} should be rejected");
    }
}

// =============================================================
// Signup
// =============================================================

#[test]
fn signup_reports_mismatched_passwords() {
    let form = SignupForm { confirm_password: "different-one".to_owned(), ..signup() };
    let errors = form.parse().unwrap_err();
    assert_eq!(errors.get(fields::CONFIRM_PASSWORD), Some("Passwords don't match"));
}

#[test]
fn signup_collects_every_failing_field() {
    let form = SignupForm {
        name: "A".to_owned(),
        email: "nope".to_owned(),
        password: "short".to_owned(),
        confirm_password: String::new(),
        ..signup()
    };
    let errors = form.parse().unwrap_err();
    assert_eq!(errors.len(), 4);
    assert!(errors.get(fields::NAME).is_some());
    assert!(errors.get(fields::EMAIL).is_some());
    assert!(errors.get(fields::PASSWORD).is_some());
    assert!(errors.get(fields::CONFIRM_PASSWORD).is_some());
}

#[test]
fn signup_details_encode_areas_as_json_string() {
    let form = SignupForm {
        areas_of_interest: vec!["genomics".to_owned(), " genomics ".to_owned(), "ecology".to_owned()],
        ..signup()
    };
    let request = form.parse().unwrap().into_request("https://admin.example/login".to_owned());
    assert_eq!(request.areas_of_interest.as_deref(), Some(r#"["genomics","ecology"]"#));
    assert_eq!(request.institution_id, Some(3));
}

#[test]
fn signup_without_areas_omits_field() {
    let form = SignupForm { areas_of_interest: Vec::new(), ..signup() };
    let request = form.parse().unwrap().into_request(String::new());
    assert_eq!(request.areas_of_interest, None);
}

// =============================================================
// Password reset
// =============================================================

#[test]
fn forgot_password_returns_trimmed_email() {
    let form = ForgotPasswordForm { email: " ada@example.com".to_owned() };
    assert_eq!(form.parse().unwrap(), "ada@example.com");
    assert!(ForgotPasswordForm::default().parse().is_err());
}

#[test]
fn new_password_requires_length_and_match() {
    let short = NewPasswordForm { password: "abc".to_owned(), confirm_password: "abc".to_owned() };
    assert!(short.parse().unwrap_err().get(fields::PASSWORD).is_some());

    let ok = NewPasswordForm { password: "abcdefgh".to_owned(), confirm_password: "abcdefgh".to_owned() };
    assert_eq!(ok.parse().unwrap(), "abcdefgh");
}

// =============================================================
// Reject + upload
// =============================================================

#[test]
fn reject_form_needs_reason() {
    assert!(RejectForm { reason: "\n".to_owned() }.parse().is_err());
    let reason = RejectForm { reason: "duplicate submission".to_owned() }.parse().unwrap();
    assert_eq!(reason.as_str(), "duplicate submission");
}

#[test]
fn upload_builds_typed_submission() {
    let paper = upload().parse().unwrap();
    assert_eq!(paper.title, "Soil carbon");
    assert_eq!(paper.category_id, 2);
    assert_eq!(paper.field_id, 5);
    assert_eq!(paper.notes, None);
}

#[test]
fn upload_requires_pdf_file() {
    let missing = UploadForm { file: None, ..upload() };
    assert_eq!(missing.parse().unwrap_err().get(fields::FILE), Some("A PDF file is required"));

    let docx = UploadForm {
        file: Some(FilePart {
            file_name: "paper.docx".to_owned(),
            content_type: "application/msword".to_owned(),
            bytes: vec![1],
        }),
        ..upload()
    };
    assert_eq!(docx.parse().unwrap_err().get(fields::FILE), Some("Only PDF files are accepted"));
}

#[test]
fn upload_requires_a_keyword_and_numeric_ids() {
    let form = UploadForm {
        keywords: vec!["  ".to_owned()],
        category_id: "abc".to_owned(),
        field_id: "0".to_owned(),
        ..upload()
    };
    let errors = form.parse().unwrap_err();
    assert!(errors.get(fields::KEYWORDS).is_some());
    assert!(errors.get(fields::CATEGORY_ID).is_some());
    assert!(errors.get(fields::FIELD_ID).is_some());
}

#[test]
fn upload_rejects_oversized_pdf() {
    let big = UploadForm {
        file: Some(FilePart {
            file_name: "paper.pdf".to_owned(),
            content_type: "application/pdf".to_owned(),
            bytes: vec![0; MAX_UPLOAD_BYTES + 1],
        }),
        ..upload()
    };
    assert_eq!(big.parse().unwrap_err().get(fields::FILE), Some("File must be 10 MB or smaller"));
}

#[test]
fn upload_drops_new_keywords_that_already_exist() {
    let form = UploadForm {
        keywords: vec!["soil".to_owned()],
        new_keywords: vec!["soil".to_owned(), "lagoons".to_owned()],
        ..upload()
    };
    let paper = form.parse().unwrap();
    assert_eq!(paper.new_keywords, vec!["lagoons".to_owned()]);
}
