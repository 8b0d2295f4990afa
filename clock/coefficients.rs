// The coefficients for the Horvath 2013 epigenetic clock model. Only the published
// subset ships as static data; completing the table means loading all 353 sites from
// an external source, which this crate does not do. No kernel consults these entries:
// they are reserved for the per-site dot product, which is deliberately not
// implemented here.

/// Per-site effect weights, keyed by Illumina CpG probe id.
pub const HORVATH_COEFFICIENTS: [(&str, f64); 3] = [
    ("cg00075967", 0.153),
    ("cg00513460", -0.049),
    ("cg00574958", 0.042),
];

/// The intercept term for the model.
pub const INTERCEPT: f64 = 0.56;

/// Looks up the effect weight for a probe id.
pub fn weight_for(probe_id: &str) -> Option<f64> {
    HORVATH_COEFFICIENTS
        .iter()
        .find(|(id, _)| *id == probe_id)
        .map(|&(_, weight)| weight)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_probes_resolve() {
        assert_eq!(weight_for("cg00075967"), Some(0.153));
        assert_eq!(weight_for("cg00513460"), Some(-0.049));
        assert_eq!(weight_for("cg00574958"), Some(0.042));
    }

    #[test]
    fn unknown_probe_is_none() {
        assert_eq!(weight_for("cg99999999"), None);
    }

    #[test]
    fn intercept_is_reserved_separately() {
        assert_eq!(weight_for("intercept"), None);
        assert!((INTERCEPT - 0.56).abs() < 1e-12);
    }
}
