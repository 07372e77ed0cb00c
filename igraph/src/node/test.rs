use super::*;

#[test]
fn detects_precoloured_labels() {
    assert!(Label::new("1").is_precoloured());
    assert!(Label::new("12").is_precoloured());
    assert!(Label::new("a2").is_precoloured());
    assert!(!Label::new("a").is_precoloured());
    assert!(!Label::new("").is_precoloured());
}

#[test]
fn merged_labels_are_sorted() {
    assert_eq!(Label::new("b").merged(&Label::new("d")).as_str(), "bd");
    assert_eq!(Label::new("d").merged(&Label::new("b")).as_str(), "bd");
    assert_eq!(Label::new("bd").merged(&Label::new("a")).as_str(), "abd");
    assert_eq!(Label::new("c").merged(&Label::new("2")).as_str(), "2c");
}

#[test]
fn merging_keeps_precoloured_status() {
    let merged = Label::new("a").merged(&Label::new("1"));
    assert!(merged.is_precoloured());
    assert!(merged.merged(&Label::new("z")).is_precoloured());
}

#[test]
fn displays_node_ids() {
    assert_eq!("@0", format!("{}", NodeId(0)));
    assert_eq!("@42", format!("{:?}", NodeId(42)));
}
