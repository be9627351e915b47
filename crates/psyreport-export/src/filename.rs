/// Prefix of every exported report file name.
pub const FILENAME_PREFIX: &str = "PsychReport_";

/// Deterministic file name for a subject's report.
///
/// Each run of whitespace in the name becomes a single underscore:
/// `"Jane  Doe"` → `PsychReport_Jane_Doe.docx`.
pub fn report_filename(subject_name: &str) -> String {
    let mut name = String::with_capacity(subject_name.len());
    let mut in_whitespace = false;
    for c in subject_name.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                name.push('_');
                in_whitespace = true;
            }
        } else {
            name.push(c);
            in_whitespace = false;
        }
    }
    format!("{FILENAME_PREFIX}{name}.docx")
}
