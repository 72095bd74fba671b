//! Stage-suffixed naming convention
//!
//! Physical names embed the deployment stage so that the same stack can be
//! synthesized into isolated environments (dev/test/uat/prod).

/// Physical name for a resource: `<id>-<stage>`
pub fn stage_name(id: &str, stage: &str) -> String {
    format!("{id}-{stage}")
}

/// Stage-scoped hostname: `<sub>-<stage>.<domain>`
pub fn stage_domain(sub: &str, stage: &str, domain: &str) -> String {
    format!("{sub}-{stage}.{domain}")
}

/// Output name: `<scoped_id>-<attribute>`
pub fn output_name(scoped_id: &str, attribute: &str) -> String {
    format!("{scoped_id}-{attribute}")
}
