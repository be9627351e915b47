//! Catalog of psychological test batteries offered on the intake form.
//!
//! Free-text assessment names are always accepted; the catalog only drives
//! suggestions and the "custom assessment" sentinel.

/// Catalog entry meaning "type the assessment name by hand".
pub const OTHER_ASSESSMENT: &str = "Other / Custom Assessment";

pub const KNOWN_ASSESSMENTS: &[&str] = &[
    "WAIS-IV (Wechsler Adult Intelligence Scale)",
    "WISC-V (Wechsler Intelligence Scale for Children)",
    "MMPI-3 (Minnesota Multiphasic Personality Inventory)",
    "BDI-II (Beck Depression Inventory)",
    "BAI (Beck Anxiety Inventory)",
    "NEO-PI-3 (NEO Personality Inventory)",
    "TAT (Thematic Apperception Test)",
    "Rorschach Inkblot Test",
    "PHQ-9 (Patient Health Questionnaire)",
    "GAD-7 (General Anxiety Disorder)",
    "16PF (Sixteen Personality Factor Questionnaire)",
    "Conners 3 (ADHD Assessment)",
    "MOCA (Montreal Cognitive Assessment)",
    "VABS-3 (Vineland Adaptive Behavior Scales)",
    "ADOS-2 (Autism Diagnostic Observation Schedule)",
    "PCL-5 (PTSD Checklist)",
    "Millon Clinical Multiaxial Inventory (MCMI-IV)",
    OTHER_ASSESSMENT,
];

/// Whether `name` is one of the catalog entries (excluding the sentinel).
pub fn is_known_assessment(name: &str) -> bool {
    name != OTHER_ASSESSMENT && KNOWN_ASSESSMENTS.contains(&name)
}

/// Find the catalog entry whose short code matches the start of `query`.
///
/// `"mmpi-3"` resolves to the full MMPI-3 entry. Short codes are the text
/// before the first space or parenthesis.
pub fn lookup(query: &str) -> Option<&'static str> {
    let query = query.trim();
    if query.is_empty() {
        return None;
    }
    KNOWN_ASSESSMENTS
        .iter()
        .copied()
        .filter(|entry| *entry != OTHER_ASSESSMENT)
        .find(|entry| {
            entry.eq_ignore_ascii_case(query)
                || short_code(entry).eq_ignore_ascii_case(query)
        })
}

fn short_code(entry: &str) -> &str {
    entry
        .split([' ', '('])
        .next()
        .unwrap_or(entry)
}
