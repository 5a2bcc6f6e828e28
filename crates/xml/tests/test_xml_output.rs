use once_cell::sync::Lazy;
use tagwright_reflect::{AccessError, Annotation, MemberInfo, Reflect, TypeDescriptor, Value};
use tagwright_xml::directive::{ATTRIBUTE, ITEM_PARAM, RAW_XML, SKIP_EMPTY, TAG};
use tagwright_xml::{Result, XmlError, XmlSerializer};

type ReadResult = std::result::Result<Value, AccessError>;

#[derive(Clone)]
struct Book {
    title: String,
    isbn: String,
    available: bool,
    summary: Option<String>,
    author: String,
}

static BOOK: Lazy<TypeDescriptor> = Lazy::new(|| {
    TypeDescriptor::new("book")
        .with_member(MemberInfo::property("title"))
        .with_member(MemberInfo::property("isbn").annotate(Annotation::new(ATTRIBUTE)))
        .with_member(
            MemberInfo::property("available")
                .annotate(Annotation::new(ATTRIBUTE))
                .annotate(Annotation::new(SKIP_EMPTY)),
        )
        .with_member(MemberInfo::property("summary").annotate(Annotation::new(SKIP_EMPTY)))
        .with_member(MemberInfo::method("getAuthor"))
});

impl Reflect for Book {
    fn type_name(&self) -> &str {
        BOOK.type_name()
    }

    fn members(&self) -> &[MemberInfo] {
        BOOK.members()
    }

    fn read(&self, index: usize) -> ReadResult {
        match index {
            0 => Ok(self.title.clone().into()),
            1 => Ok(self.isbn.clone().into()),
            2 => Ok(self.available.into()),
            3 => Ok(self.summary.clone().into()),
            4 => Ok(self.author.clone().into()),
            _ => Err(AccessError::NoSuchMember { index }),
        }
    }
}

fn example_book() -> Book {
    Book {
        title: "Systems".to_string(),
        isbn: "12-34".to_string(),
        available: false,
        summary: None,
        author: "Doe".to_string(),
    }
}

#[test]
fn test_element_with_text_content() -> Result<()> {
    struct Plain {
        no_xml: String,
    }

    static PLAIN: Lazy<TypeDescriptor> =
        Lazy::new(|| TypeDescriptor::new("plain").with_member(MemberInfo::property("noXml")));

    impl Reflect for Plain {
        fn type_name(&self) -> &str {
            PLAIN.type_name()
        }

        fn members(&self) -> &[MemberInfo] {
            PLAIN.members()
        }

        fn read(&self, index: usize) -> ReadResult {
            match index {
                0 => Ok(self.no_xml.clone().into()),
                _ => Err(AccessError::NoSuchMember { index }),
            }
        }
    }

    let value = Value::object(Plain {
        no_xml: "bar".to_string(),
    });
    let xml = XmlSerializer::new().to_xml_string(&value)?;
    println!("XML output:\n{}", xml);

    assert_eq!(
        xml,
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?><plain><noXml>bar</noXml></plain>"
    );

    Ok(())
}

#[test]
fn test_attribute_placement_and_boolean_literal() -> Result<()> {
    let xml = XmlSerializer::new().to_xml_string(&Value::object(example_book()))?;
    println!("XML output (book):\n{}", xml);

    assert!(xml.contains("isbn=\"12-34\""));
    // Booleans always serialize, even with skipEmpty requested.
    assert!(xml.contains("available=\"false\""));
    assert!(xml.contains("<title>Systems</title>"));
    assert!(xml.contains("<author>Doe</author>"));

    Ok(())
}

#[test]
fn test_skip_empty_omits_null_member() -> Result<()> {
    let xml = XmlSerializer::new().to_xml_string(&Value::object(example_book()))?;

    // summary is null and skipEmpty is set
    assert!(!xml.contains("summary"));

    Ok(())
}

#[test]
fn test_empty_attribute_written_without_skip() -> Result<()> {
    struct Label {
        text: String,
        note: String,
    }

    static LABEL: Lazy<TypeDescriptor> = Lazy::new(|| {
        TypeDescriptor::new("label")
            .with_member(MemberInfo::property("text").annotate(Annotation::new(ATTRIBUTE)))
            .with_member(
                MemberInfo::property("note")
                    .annotate(Annotation::new(ATTRIBUTE))
                    .annotate(Annotation::new(SKIP_EMPTY)),
            )
    });

    impl Reflect for Label {
        fn type_name(&self) -> &str {
            LABEL.type_name()
        }

        fn members(&self) -> &[MemberInfo] {
            LABEL.members()
        }

        fn read(&self, index: usize) -> ReadResult {
            match index {
                0 => Ok(self.text.clone().into()),
                1 => Ok(self.note.clone().into()),
                _ => Err(AccessError::NoSuchMember { index }),
            }
        }
    }

    let xml = XmlSerializer::new().to_xml_string(&Value::object(Label {
        text: String::new(),
        note: String::new(),
    }))?;
    println!("XML output (label):\n{}", xml);

    assert!(xml.contains("text=\"\""));
    assert!(!xml.contains("note"));

    Ok(())
}

#[test]
fn test_empty_element_without_skip() -> Result<()> {
    struct Record {
        no_data: Option<String>,
    }

    static RECORD: Lazy<TypeDescriptor> =
        Lazy::new(|| TypeDescriptor::new("record").with_member(MemberInfo::property("noData")));

    impl Reflect for Record {
        fn type_name(&self) -> &str {
            RECORD.type_name()
        }

        fn members(&self) -> &[MemberInfo] {
            RECORD.members()
        }

        fn read(&self, index: usize) -> ReadResult {
            match index {
                0 => Ok(self.no_data.clone().into()),
                _ => Err(AccessError::NoSuchMember { index }),
            }
        }
    }

    let xml = XmlSerializer::new().to_xml_string(&Value::object(Record { no_data: None }))?;
    println!("XML output (record):\n{}", xml);

    assert!(xml.contains("<noData/>"));

    Ok(())
}

#[test]
fn test_sequence_preserves_iteration_order() -> Result<()> {
    struct Playlist {
        tracks: Vec<String>,
    }

    static PLAYLIST: Lazy<TypeDescriptor> = Lazy::new(|| {
        TypeDescriptor::new("playlist").with_member(
            MemberInfo::property("tracks")
                .annotate(Annotation::new(TAG).with_value("tracks").with_param(ITEM_PARAM, "track")),
        )
    });

    impl Reflect for Playlist {
        fn type_name(&self) -> &str {
            PLAYLIST.type_name()
        }

        fn members(&self) -> &[MemberInfo] {
            PLAYLIST.members()
        }

        fn read(&self, index: usize) -> ReadResult {
            match index {
                0 => Ok(self.tracks.clone().into()),
                _ => Err(AccessError::NoSuchMember { index }),
            }
        }
    }

    let xml = XmlSerializer::new().to_xml_string(&Value::object(Playlist {
        tracks: vec!["a".to_string(), "b".to_string(), "c".to_string()],
    }))?;
    println!("XML output (playlist):\n{}", xml);

    assert!(xml.contains(
        "<tracks><track>a</track><track>b</track><track>c</track></tracks>"
    ));

    Ok(())
}

#[test]
fn test_nested_object_recursion() -> Result<()> {
    struct Library {
        name: String,
        featured: Book,
    }

    static LIBRARY: Lazy<TypeDescriptor> = Lazy::new(|| {
        TypeDescriptor::new("library")
            .with_member(MemberInfo::property("name"))
            .with_member(MemberInfo::property("featured"))
    });

    impl Reflect for Library {
        fn type_name(&self) -> &str {
            LIBRARY.type_name()
        }

        fn members(&self) -> &[MemberInfo] {
            LIBRARY.members()
        }

        fn read(&self, index: usize) -> ReadResult {
            match index {
                0 => Ok(self.name.clone().into()),
                1 => Ok(Value::object(self.featured.clone())),
                _ => Err(AccessError::NoSuchMember { index }),
            }
        }
    }

    let xml = XmlSerializer::new().to_xml_string(&Value::object(Library {
        name: "Central".to_string(),
        featured: example_book(),
    }))?;
    println!("XML output (library):\n{}", xml);

    assert!(xml.contains("<library>"));
    assert!(xml.contains("<name>Central</name>"));
    // The nested object takes the member's name, not its type name.
    assert!(xml.contains("<featured isbn=\"12-34\""));
    assert!(xml.contains("<title>Systems</title>"));
    assert!(!xml.contains("<book"));

    Ok(())
}

#[test]
fn test_properties_serialize_before_methods() -> Result<()> {
    struct Mixed {
        alpha: String,
    }

    static MIXED: Lazy<TypeDescriptor> = Lazy::new(|| {
        TypeDescriptor::new("mixed")
            .with_member(MemberInfo::method("getZeta"))
            .with_member(MemberInfo::property("alpha"))
    });

    impl Reflect for Mixed {
        fn type_name(&self) -> &str {
            MIXED.type_name()
        }

        fn members(&self) -> &[MemberInfo] {
            MIXED.members()
        }

        fn read(&self, index: usize) -> ReadResult {
            match index {
                0 => Ok("z".into()),
                1 => Ok(self.alpha.clone().into()),
                _ => Err(AccessError::NoSuchMember { index }),
            }
        }
    }

    let xml = XmlSerializer::new().to_xml_string(&Value::object(Mixed {
        alpha: "a".to_string(),
    }))?;
    println!("XML output (mixed):\n{}", xml);

    let alpha = xml.find("<alpha>").expect("alpha element");
    let zeta = xml.find("<zeta>").expect("zeta element");
    assert!(alpha < zeta);

    Ok(())
}

struct FragmentSource {
    markup: String,
}

static FRAGMENT_SOURCE: Lazy<TypeDescriptor> = Lazy::new(|| {
    TypeDescriptor::new("fragmentSource").with_member(
        MemberInfo::method("noXml")
            .annotate(Annotation::new(TAG).with_value(false))
            .annotate(Annotation::new(RAW_XML)),
    )
});

impl Reflect for FragmentSource {
    fn type_name(&self) -> &str {
        FRAGMENT_SOURCE.type_name()
    }

    fn members(&self) -> &[MemberInfo] {
        FRAGMENT_SOURCE.members()
    }

    fn read(&self, index: usize) -> ReadResult {
        match index {
            0 => Ok(self.markup.clone().into()),
            _ => Err(AccessError::NoSuchMember { index }),
        }
    }
}

#[test]
fn test_fragment_inlined_without_escaping() -> Result<()> {
    let xml = XmlSerializer::new().to_xml_string(&Value::object(FragmentSource {
        markup: "<p>pre-formed <b>markup</b></p>".to_string(),
    }))?;
    println!("XML output (fragment):\n{}", xml);

    assert!(xml.contains("<fragmentSource><p>pre-formed <b>markup</b></p></fragmentSource>"));

    Ok(())
}

#[test]
fn test_empty_fragment_without_skip_is_an_error() {
    let result = XmlSerializer::new().to_xml_string(&Value::object(FragmentSource {
        markup: String::new(),
    }));

    match result {
        Err(XmlError::InvalidFragment { member, .. }) => assert_eq!(member, "noXml"),
        other => panic!("expected InvalidFragment, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_malformed_fragment_is_an_error() {
    let result = XmlSerializer::new().to_xml_string(&Value::object(FragmentSource {
        markup: "<p>unclosed".to_string(),
    }));

    assert!(matches!(result, Err(XmlError::InvalidFragment { .. })));
}

#[test]
fn test_failing_method_aborts_serialization() {
    struct Faulty;

    static FAULTY: Lazy<TypeDescriptor> =
        Lazy::new(|| TypeDescriptor::new("faulty").with_member(MemberInfo::method("getTotal")));

    impl Reflect for Faulty {
        fn type_name(&self) -> &str {
            FAULTY.type_name()
        }

        fn members(&self) -> &[MemberInfo] {
            FAULTY.members()
        }

        fn read(&self, index: usize) -> ReadResult {
            match index {
                0 => Err(AccessError::Invocation {
                    member: "getTotal".to_string(),
                    message: "overflow".to_string(),
                }),
                _ => Err(AccessError::NoSuchMember { index }),
            }
        }
    }

    let result = XmlSerializer::new().to_xml_string(&Value::object(Faulty));
    match result {
        Err(XmlError::MemberAccess { member, .. }) => assert_eq!(member, "getTotal"),
        other => panic!("expected MemberAccess, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn test_scalar_roots() -> Result<()> {
    let serializer = XmlSerializer::new();

    let xml = serializer.to_xml_string(&Value::from("hello"))?;
    assert!(xml.contains("<root>hello</root>"));

    let xml = serializer.to_xml_string(&Value::from(true))?;
    assert!(xml.contains("<root>true</root>"));

    let xml = serializer.to_xml_string(&Value::from(7))?;
    assert!(xml.contains("<root>7</root>"));

    Ok(())
}

#[test]
fn test_sequence_root() -> Result<()> {
    let xml = XmlSerializer::new().to_xml_string(&Value::from(vec!["x", "y"]))?;
    println!("XML output (sequence root):\n{}", xml);

    assert!(xml.contains("<root><item>x</item><item>y</item></root>"));

    Ok(())
}
