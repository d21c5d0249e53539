//! Candidate filtering
//!
//! Free-form and baseline templates are always available to the user, so they
//! never compete in the ranking.

use tracing::debug;

use crate::catalog::CompositionTemplate;
use crate::config::FilterConfig;
use crate::normalize::{contains_any, normalize};

/// True when the template is a free-form or baseline layout.
pub fn is_free_form(template: &CompositionTemplate, config: &FilterConfig) -> bool {
    if config.excluded_ids.iter().any(|id| *id == template.id) {
        return true;
    }

    let id = template.id.to_lowercase();
    if config
        .free_form_id_suffixes
        .iter()
        .any(|suffix| id.ends_with(suffix.as_str()))
        || contains_any(&id, &config.free_form_id_markers)
    {
        return true;
    }

    contains_any(&normalize(&template.name), &config.free_form_name_markers)
}

/// Keep only the templates that may be scored, in catalog order.
pub fn filter_candidates<'a>(
    templates: &'a [CompositionTemplate],
    config: &FilterConfig,
) -> Vec<&'a CompositionTemplate> {
    let kept: Vec<&CompositionTemplate> = templates
        .iter()
        .filter(|t| !is_free_form(t, config))
        .collect();
    debug!(
        total = templates.len(),
        kept = kept.len(),
        dropped = templates.len() - kept.len(),
        "Filtered free-form templates"
    );
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: &str, name: &str) -> CompositionTemplate {
        CompositionTemplate {
            id: id.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_baseline_ids_dropped() {
        let config = FilterConfig::default();
        assert!(is_free_form(&template("basic-mosaic-flow", "Mosaico"), &config));
        assert!(is_free_form(&template("servicio-benefit", "Beneficio"), &config));
    }

    #[test]
    fn test_free_suffix_and_marker() {
        let config = FilterConfig::default();
        assert!(is_free_form(&template("oferta-free", "Oferta"), &config));
        assert!(is_free_form(&template("Evento-FREE", "Evento"), &config));
        assert!(is_free_form(&template("x-default-free-v2", "X"), &config));
        assert!(!is_free_form(&template("free-standing-hero", "Hero"), &config));
    }

    #[test]
    fn test_free_form_name() {
        let config = FilterConfig::default();
        assert!(is_free_form(&template("cita-1", "Composición Libre"), &config));
        assert!(is_free_form(&template("cita-2", "Free-form quote"), &config));
        assert!(!is_free_form(&template("cita-3", "Cita destacada"), &config));
    }

    #[test]
    fn test_filter_preserves_order() {
        let templates = vec![
            template("a", "A"),
            template("default-free", "Libre"),
            template("b", "B"),
            template("c-free", "C"),
            template("c", "C"),
        ];
        let kept: Vec<&str> = filter_candidates(&templates, &FilterConfig::default())
            .into_iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(kept, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_config_keeps_everything() {
        let config = FilterConfig {
            excluded_ids: vec![],
            free_form_id_suffixes: vec![],
            free_form_id_markers: vec![],
            free_form_name_markers: vec![],
        };
        assert!(!is_free_form(&template("default-free", "Libre"), &config));
    }
}
