use pdf_notes::*;

#[test]
fn test_defaults() {
    let options = LayoutOptions::default();
    assert_eq!(options.slides_per_page, 5);
    assert_eq!(options.note_fraction, 0.3);
    assert_eq!(options.label, None);
    assert_eq!(options.emoji, None);
    assert!(!options.show_borders);
    assert!(options.show_separator);
    assert_eq!(options.separator_color, Rgb::gray(0.6));
    assert!(options.show_page_numbers);
    assert!(options.show_slide_numbers);
    assert_eq!(options.page_number_start, 1);
    assert!(options.validate().is_ok());
}

#[test]
fn test_validation_slides_per_page() {
    let mut options = LayoutOptions::default();

    for valid in [1, 5, 10] {
        options.slides_per_page = valid;
        assert!(options.validate().is_ok(), "{} should be valid", valid);
    }

    for invalid in [0, 11, 100] {
        options.slides_per_page = invalid;
        match options.validate() {
            Err(NotesError::Config(msg)) => assert!(msg.contains("Slides per page")),
            other => panic!("Expected Config error for {}, got {:?}", invalid, other),
        }
    }
}

#[test]
fn test_validation_note_fraction() {
    let mut options = LayoutOptions::default();

    for valid in [0.0, 0.3, 0.99] {
        options.note_fraction = valid;
        assert!(options.validate().is_ok(), "{} should be valid", valid);
    }

    for invalid in [1.0, 1.5, -0.1, f32::NAN, f32::INFINITY] {
        options.note_fraction = invalid;
        assert!(
            matches!(options.validate(), Err(NotesError::Config(_))),
            "{} should be rejected",
            invalid
        );
    }
}

#[test]
fn test_validation_separator_color() {
    let options = LayoutOptions {
        separator_color: Rgb::new(0.0, 1.2, 0.0),
        ..Default::default()
    };
    assert!(matches!(options.validate(), Err(NotesError::Config(_))));
}

#[test]
fn test_emoji_parsing() {
    assert_eq!("brain".parse::<Emoji>().unwrap(), Emoji::Brain);
    assert_eq!("Rocket".parse::<Emoji>().unwrap(), Emoji::Rocket);
    assert_eq!(" book ".parse::<Emoji>().unwrap(), Emoji::Book);
    assert!(matches!(
        "unicorn".parse::<Emoji>(),
        Err(NotesError::Config(_))
    ));

    assert_eq!(Emoji::Fire.symbol(), "\u{1F525}");
    assert_eq!(Emoji::Star.symbol(), "\u{2B50}");
    for emoji in Emoji::ALL {
        assert_eq!(emoji.key().parse::<Emoji>().unwrap(), emoji);
    }
}

#[test]
fn test_color_parsing() {
    assert_eq!("0,0,0".parse::<Rgb>().unwrap(), Rgb::BLACK);
    assert_eq!(
        "0.5, 0.25 ,1".parse::<Rgb>().unwrap(),
        Rgb::new(0.5, 0.25, 1.0)
    );

    for malformed in ["", "0,0", "0,0,0,0", "a,b,c", "0,0,2", "-1,0,0", "NaN,0,0"] {
        assert!(
            matches!(malformed.parse::<Rgb>(), Err(NotesError::Config(_))),
            "{:?} should be rejected",
            malformed
        );
    }
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_save_and_load_options() {
    use tempfile::NamedTempFile;

    let options = LayoutOptions {
        slides_per_page: 3,
        note_fraction: 0.4,
        label: Some("CS101".to_string()),
        emoji: Some(Emoji::Rocket),
        show_borders: true,
        separator_color: Rgb::new(0.1, 0.2, 0.3),
        show_page_numbers: false,
        page_number_start: 7,
        ..Default::default()
    };

    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    options.save(path).await.unwrap();
    let loaded = LayoutOptions::load(path).await.unwrap();

    assert_eq!(loaded, options);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_partial_config_uses_defaults() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();
    std::fs::write(
        temp_file.path(),
        r#"{ "slides_per_page": 4, "emoji": "star" }"#,
    )
    .unwrap();

    let loaded = LayoutOptions::load(temp_file.path()).await.unwrap();
    assert_eq!(loaded.slides_per_page, 4);
    assert_eq!(loaded.emoji, Some(Emoji::Star));
    assert_eq!(loaded.note_fraction, 0.3);
}

#[cfg(feature = "serde")]
#[tokio::test]
async fn test_load_rejects_bad_config() {
    use tempfile::NamedTempFile;

    let temp_file = NamedTempFile::new().unwrap();

    std::fs::write(temp_file.path(), r#"{ "emoji": "unicorn" }"#).unwrap();
    assert!(matches!(
        LayoutOptions::load(temp_file.path()).await,
        Err(NotesError::Config(_))
    ));

    std::fs::write(temp_file.path(), r#"{ "slides_per_page": 0 }"#).unwrap();
    assert!(matches!(
        LayoutOptions::load(temp_file.path()).await,
        Err(NotesError::Config(_))
    ));
}
