/// Display labels for the canonical category keys stored by the backend
const LABELS: &[(&str, &str)] = &[
    ("Portrait", "Ảnh Chân Dung"),
    ("Landscape", "Ảnh Phong Cảnh"),
    ("Street", "Ảnh Tự Do"),
];

/// Maps a stored category key to the label shown in the UI.
///
/// Keys without an entry are shown as stored.
pub fn display_label(key: &str) -> &str {
    LABELS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, label)| *label)
        .unwrap_or(key)
}
