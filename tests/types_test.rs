use std::str::FromStr;

use wspotify::types::{AlbumData, Group, Page, SimplifiedTrack, TrackTableRow};

#[test]
fn test_group_from_str() {
    assert_eq!(Group::from_str("appears_on"), Ok(Group::AppearsOn));
    assert_eq!(Group::from_str(" Single "), Ok(Group::Single));
    assert!(Group::from_str("ep").is_err());
    assert_eq!(Group::Compilation.to_string(), "compilation");
}

#[test]
fn test_page_tolerates_missing_metadata() {
    let page: Page<SimplifiedTrack> =
        serde_json::from_str(r#"{"total": 2, "items": [{"id": "a"}, {"id": "b", "name": "B"}]}"#)
            .unwrap();

    assert_eq!(page.total, 2);
    assert_eq!(page.items[1].name, "B");
    assert!(page.next.is_none());
}

#[test]
fn test_album_flattens_simplified_fields() {
    let album: AlbumData = serde_json::from_str(
        r#"{
            "id": "4aawyAB9vmqN3uQ7FjRGTy",
            "name": "Global Warming",
            "type": "album",
            "release_date": "2012-11-16",
            "label": "Mr.305/Polo Grounds Music/RCA Records",
            "tracks": {"total": 1, "items": [{"id": "t1", "duration_ms": 245000}]}
        }"#,
    )
    .unwrap();

    assert_eq!(album.album.name, "Global Warming");
    assert_eq!(album.album.kind, "album");
    assert_eq!(album.tracks.items[0].duration_ms, 245000);

    let row = TrackTableRow::new(1, &album.tracks.items[0]);
    assert_eq!(row.duration, "4:05");
}
