use modelkit_config::{ValidationIssue, ValidationReport, checks};

/// Render a deterministic markdown report of a registry check.
pub fn render_check_report(report: &ValidationReport) -> String {
    let mut lines = Vec::new();

    lines.push("# Modelkit Check Report".to_string());
    lines.push(String::new());
    lines.push("## Summary".to_string());
    lines.push(format!(
        "- status: {}",
        if report.is_ok() { "ok" } else { "failed" }
    ));
    lines.push(format!("- errors: {}", report.errors.len()));
    lines.push(format!("- warnings: {}", report.warnings.len()));
    lines.push(String::new());

    let fired: Vec<_> = checks::ALL
        .iter()
        .filter_map(|check| {
            let code = check.code();
            let count = report
                .errors
                .iter()
                .chain(&report.warnings)
                .filter(|issue| issue.code == code)
                .count();
            (count > 0).then(|| (code, check.summary(), count))
        })
        .collect();

    if !fired.is_empty() {
        lines.push("## Checks".to_string());
        lines.push("| check | summary | count |".to_string());
        lines.push("| --- | --- | --- |".to_string());
        for (code, summary, count) in fired {
            lines.push(format!("| {code} | {summary} | {count} |"));
        }
        lines.push(String::new());
    }

    push_issues(&mut lines, "Errors", &report.errors);
    push_issues(&mut lines, "Warnings", &report.warnings);

    lines.join("\n")
}

fn push_issues(lines: &mut Vec<String>, title: &str, issues: &[ValidationIssue]) {
    if issues.is_empty() {
        return;
    }
    lines.push(format!("## {title}"));
    for issue in issues {
        let hint = issue
            .hint
            .as_ref()
            .map(|hint| format!(" (hint: {hint})"))
            .unwrap_or_default();
        lines.push(format!(
            "- {} {}: {}{}",
            issue.code, issue.path, issue.message, hint
        ));
    }
    lines.push(String::new());
}

#[cfg(test)]
mod tests {
    use super::*;
    use modelkit_config::IssueSeverity;

    #[test]
    fn clean_report_has_only_summary() {
        let rendered = render_check_report(&ValidationReport::default());
        assert!(rendered.contains("- status: ok"));
        assert!(!rendered.contains("## Checks"));
        assert!(!rendered.contains("## Errors"));
    }

    #[test]
    fn groups_issues_by_check() {
        let mut report = ValidationReport::default();
        report.push(ValidationIssue::new(
            IssueSeverity::Error,
            checks::UNKNOWN_ATTRIBUTE.code(),
            "/models/0/artifacts/form/1",
            "'titel' is not a valid attribute of 'Project'",
            Some("did you mean 'title'?".to_string()),
        ));
        report.push(ValidationIssue::new(
            IssueSeverity::Warning,
            checks::UNKNOWN_EXCLUSION.code(),
            "/models/0/exclude/0",
            "exclusion 'legacy' is not an attribute of 'Project'",
            None,
        ));

        let rendered = render_check_report(&report);
        assert!(rendered.contains("- status: failed"));
        assert!(rendered.contains("| modelkit.E004 | unknown attribute | 1 |"));
        assert!(rendered.contains("| modelkit.W003 | exclusion names unknown attribute | 1 |"));
        assert!(rendered.contains(
            "- modelkit.E004 /models/0/artifacts/form/1: 'titel' is not a valid attribute of 'Project' (hint: did you mean 'title'?)"
        ));
    }
}
