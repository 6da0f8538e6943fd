use super::*;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
struct RecordingBinding {
    visible: Mutex<HashMap<String, bool>>,
}

impl RecordingBinding {
    fn visible_regions(&self) -> Vec<String> {
        let visible = self.visible.lock().unwrap();
        let mut regions: Vec<String> = visible
            .iter()
            .filter(|(_, v)| **v)
            .map(|(k, _)| k.clone())
            .collect();
        regions.sort();
        regions
    }
}

impl ViewBinding for RecordingBinding {
    fn set_visible(&self, region: &str, visible: bool) {
        self.visible.lock().unwrap().insert(region.to_string(), visible);
    }
}

fn display(binding: Arc<RecordingBinding>) -> StepDisplay<&'static str> {
    StepDisplay::new(
        vec![
            ("form", "stepForm".into()),
            ("loading", "stepLoading".into()),
            ("ready", "stepReady".into()),
        ],
        binding,
    )
}

#[test]
fn exactly_one_region_visible() {
    let binding = Arc::new(RecordingBinding::default());
    let mut display = display(Arc::clone(&binding));

    display.show("form");
    assert_eq!(binding.visible_regions(), vec!["stepForm"]);
    assert_eq!(display.visible(), Some("form"));

    display.show("loading");
    assert_eq!(binding.visible_regions(), vec!["stepLoading"]);

    display.show("ready");
    assert_eq!(binding.visible_regions(), vec!["stepReady"]);
}

#[test]
fn unregistered_step_is_ignored() {
    let binding = Arc::new(RecordingBinding::default());
    let mut display = display(Arc::clone(&binding));

    display.show("form");
    display.show("birthdate");

    // Projection unchanged.
    assert_eq!(binding.visible_regions(), vec!["stepForm"]);
    assert_eq!(display.visible(), Some("form"));
}

#[test]
fn nothing_visible_before_first_show() {
    let binding = Arc::new(RecordingBinding::default());
    let display = display(Arc::clone(&binding));
    assert_eq!(display.visible(), None);
    assert!(binding.visible_regions().is_empty());
}
