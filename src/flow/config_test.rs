use super::*;

const FLOOR: Duration = Duration::from_secs(2);

#[test]
fn self_service_shape() {
    let config = self_service(FLOOR);
    assert!(config.requires_doc_type);
    assert!(!config.enforce_number_length);
    assert!(config.secondary.is_some());
    assert!(!config.has_text_step);
    assert_eq!(config.continuation, ContinuationKind::Token);
    assert_eq!(config.verify.path, "/api/verificar");
    assert_eq!(config.generate.path, "/api/certificados/generar");
    assert!(config.regions.iter().any(|(step, _)| *step == Step::Birthdate));
}

#[test]
fn admin_shape() {
    let config = admin(FLOOR);
    assert!(!config.requires_doc_type);
    assert!(config.enforce_number_length);
    assert!(config.secondary.is_none());
    assert!(!config.has_text_step);
    assert_eq!(config.continuation, ContinuationKind::Number);
    assert!(!config.regions.iter().any(|(step, _)| *step == Step::Birthdate));
    assert!(config.copy.ready_recent.contains("(Admin)"));
}

#[test]
fn admin_special_shape() {
    let config = admin_special(FLOOR);
    assert!(config.has_text_step);
    assert_eq!(config.continuation, ContinuationKind::NumberWithText);
    assert_eq!(config.verify.path, "/api/admin/certificados/especial/validar");
    assert!(config.regions.iter().any(|(step, _)| *step == Step::Text));
}

#[test]
fn generation_schedules_extend_past_floor() {
    for config in [self_service(FLOOR), admin(FLOOR), admin_special(FLOOR)] {
        let loading = &config.generate.loading;
        assert!(loading.total > FLOOR, "{} generation must out-hold the floor", config.name);
        for update in &loading.updates {
            assert!(update.at <= loading.total, "{} update past its total", config.name);
        }
        // Verification transitions use the plain floor.
        assert_eq!(config.verify.loading.total, FLOOR);
    }
}

#[test]
fn region_names_are_distinct_per_flow() {
    for config in [self_service(FLOOR), admin(FLOOR), admin_special(FLOOR)] {
        let mut names: Vec<&str> = config.regions.iter().map(|(_, id)| id.as_str()).collect();
        names.sort_unstable();
        let before = names.len();
        names.dedup();
        assert_eq!(before, names.len(), "{} has duplicate region names", config.name);
    }
}
