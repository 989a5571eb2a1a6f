//! End-to-end encode/decode scenarios through the public API.

use jsonapi_tag::model::{Link, RelationshipBuilder, ResourceLinkage};
use jsonapi_tag::{
    Cardinality, Context, DecodeOptions, Decoder, Encoder, Error, ErrorKind, Json, Relationship, Resources, Root,
    VALUE_SLOT, codec, decode, decode_many, encode, encode_many,
};
use serde_json::json;
use uuid::Uuid;

jsonapi_tag::record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Test {
        #[jsonapi("identifier,test")]
        id: u64,
        #[jsonapi("attribute,first")]
        first: i32,
        #[jsonapi("attribute,second")]
        second: String,
        #[jsonapi("relationship,one,data,other")]
        one_rel: u64,
        #[jsonapi("relationship,many,data,other")]
        many_rels: Vec<u64>,
    }
}

fn sample() -> Test {
    Test {
        id: 42,
        first: 84,
        second: "a string".to_string(),
        one_rel: 4242,
        many_rels: vec![21, 42],
    }
}

#[test]
fn test_scenario_encodes_documented_resource() {
    let root = encode(&sample()).unwrap();

    assert_eq!(
        serde_json::to_value(&root).unwrap(),
        json!({
            "data": {
                "id": "42",
                "type": "test",
                "attributes": {"first": 84, "second": "a string"},
                "relationships": {
                    "one": {"data": {"id": "4242", "type": "other"}},
                    "many": {"data": [
                        {"id": "21", "type": "other"},
                        {"id": "42", "type": "other"}
                    ]}
                }
            }
        })
    );
}

#[test]
fn test_scenario_decodes_back_exactly() {
    let root = encode(&sample()).unwrap();
    let mut decoded = Test::default();
    let report = decode(&root, &mut decoded).unwrap();

    assert!(report.is_clean());
    assert_eq!(decoded, sample());
}

#[test]
fn test_scenario_through_bytes() {
    let bytes = codec::to_vec(&encode(&sample()).unwrap()).unwrap();
    let parsed = codec::from_slice(&bytes).unwrap();
    jsonapi_tag::validate_root(&parsed).unwrap();

    let mut decoded = Test::default();
    decode(&parsed, &mut decoded).unwrap();
    assert_eq!(decoded, sample());
}

#[test]
fn test_collection_round_trip() {
    let tests: Vec<Test> = (0..4)
        .map(|i| Test {
            id: i,
            many_rels: (0..i).collect(),
            ..sample()
        })
        .collect();

    let root = encode_many(&tests).unwrap();
    assert_eq!(root.data.as_ref().unwrap().cardinality(), Cardinality::Many);

    let text = codec::to_string_pretty(&root).unwrap();
    let parsed = codec::from_str(&text).unwrap();

    let mut decoded: Vec<Test> = Vec::new();
    decode_many(&parsed, &mut decoded).unwrap();
    assert_eq!(decoded, tests);
}

#[test]
fn test_plural_resource_type_decodes() {
    let root = codec::from_str(
        r#"{"data": {"type": "tests", "id": "7", "attributes": {"first": "3"},
            "relationships": {"one": {"data": {"type": "others", "id": "1"}}}}}"#,
    )
    .unwrap();
    let mut decoded = Test::default();
    decode(&root, &mut decoded).unwrap();
    assert_eq!((decoded.id, decoded.first, decoded.one_rel), (7, 3, 1));

    jsonapi_tag::record! {
        #[derive(Debug, Default)]
        struct Tes {
            #[jsonapi("identifier,tes")]
            id: u64,
        }
    }
    let err = decode(&root, &mut Tes::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::IdentifierTypeMismatch);
}

jsonapi_tag::record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Article {
        #[jsonapi("identifier,articles")]
        id: Uuid,
        #[jsonapi("attribute,title")]
        title: String,
        #[jsonapi("attribute,rating")]
        rating: Option<f64>,
        #[jsonapi("attribute,published")]
        published: bool,
        #[jsonapi("attribute,tags")]
        tags: Vec<String>,
        #[jsonapi("attribute,extra")]
        extra: Json<Vec<(String, u8)>>,
        #[jsonapi("relationship,author,context")]
        author: u64,
        #[jsonapi("relationship,editor,data,people")]
        editor: Option<Uuid>,
        #[jsonapi("relationship,comments,link")]
        comments: String,
        #[jsonapi("relationship,series")]
        series: Option<Relationship>,
        #[jsonapi("link,self")]
        url: String,
        #[jsonapi("link,related,context")]
        related: String,
        #[jsonapi("meta,revision")]
        revision: u16,
        #[jsonapi("-")]
        cached_html: String,
    }
}

fn article_context() -> Context {
    let mut context = Context::new();
    context.register_relationship(
        "author",
        RelationshipBuilder::new()
            .to_one("people", VALUE_SLOT)
            .link("related", VALUE_SLOT)
            .meta("source", "directory")
            .build()
            .unwrap(),
    );
    let mut related = Link::new(VALUE_SLOT);
    related.meta.add("kind", "related").unwrap();
    context.register_link("related", related);
    context
}

fn article() -> Article {
    Article {
        id: Uuid::parse_str("67e55044-10b1-426f-9247-bb680e5fe0c8").unwrap(),
        title: "Rust and JSON:API".to_string(),
        rating: Some(4.5),
        published: true,
        tags: vec!["rust".to_string(), "serde".to_string()],
        extra: Json(vec![("a".to_string(), 1)]),
        author: 9,
        editor: None,
        comments: "/articles/1/comments".to_string(),
        series: Some(RelationshipBuilder::new().to_many("series", "intro").build().unwrap()),
        url: "/articles/1".to_string(),
        related: "/articles/1/related".to_string(),
        revision: 3,
        cached_html: "<p>not encoded</p>".to_string(),
    }
}

#[test]
fn test_every_annotation_kind() {
    let context = article_context();
    let root = Encoder::new().with_context(&context).encode(&article()).unwrap();

    assert_eq!(
        serde_json::to_value(&root).unwrap(),
        json!({
            "data": {
                "id": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "type": "articles",
                "attributes": {
                    "title": "Rust and JSON:API",
                    "rating": 4.5,
                    "published": true,
                    "tags": ["rust", "serde"],
                    "extra": [["a", 1]]
                },
                "relationships": {
                    "author": {
                        "links": {"related": "9"},
                        "data": {"id": "9", "type": "people"},
                        "meta": {"source": "directory"}
                    },
                    "editor": {"data": null},
                    "comments": {"links": {"self": "/articles/1/comments"}},
                    "series": {"data": [{"id": "intro", "type": "series"}]}
                },
                "links": {
                    "self": "/articles/1",
                    "related": {"href": "/articles/1/related", "meta": {"kind": "related"}}
                },
                "meta": {"revision": 3}
            }
        })
    );

    // Templates are untouched by population.
    let fresh = article_context();
    assert_eq!(context.relationship("author").unwrap(), fresh.relationship("author").unwrap());
    assert_eq!(context.link("related").unwrap(), fresh.link("related").unwrap());
}

#[test]
fn test_every_annotation_kind_decodes() {
    let context = article_context();
    let root = Encoder::new().with_context(&context).encode(&article()).unwrap();

    let mut decoded = Article {
        editor: Some(Uuid::nil()),
        ..Article::default()
    };
    let report = decode(&root, &mut decoded).unwrap();
    assert!(report.is_clean());

    // Context, link-mode, and inline relationships are not recovered; a null
    // to-one linkage leaves its field alone.
    let expected = Article {
        author: 0,
        editor: Some(Uuid::nil()),
        comments: String::new(),
        series: None,
        related: String::new(),
        cached_html: String::new(),
        ..article()
    };
    assert_eq!(decoded, expected);
}

#[test]
fn test_uuid_linkage_round_trip() {
    let editor = Uuid::parse_str("a1a2a3a4-b1b2-c1c2-d1d2-d3d4d5d6d7d8").unwrap();
    let context = article_context();
    let source = Article {
        editor: Some(editor),
        ..article()
    };
    let root = Encoder::new().with_context(&context).encode(&source).unwrap();

    let mut decoded = Article::default();
    decode(&root, &mut decoded).unwrap();
    assert_eq!(decoded.editor, Some(editor));
    assert_eq!(decoded.id, source.id);
}

#[test]
fn test_invalid_uuid_is_reported() {
    let root = codec::from_str(r#"{"data": {"type": "articles", "id": "not-a-uuid"}}"#).unwrap();

    let mut decoded = Article::default();
    let report = decode(&root, &mut decoded).unwrap();
    assert_eq!(report.defaulted(), ["id"]);
    assert!(decoded.id.is_nil());

    let err = Decoder::new()
        .options(DecodeOptions::strict())
        .decode(&root, &mut decoded)
        .unwrap_err();
    assert_eq!(err, Error::Coercion { member: "id".to_string() });
}

jsonapi_tag::record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct Ticket {
        #[jsonapi("identifier,tickets")]
        id: Option<Uuid>,
        #[jsonapi("attribute,owner")]
        owner: Uuid,
        #[jsonapi("attribute,watchers")]
        watchers: Vec<Uuid>,
        #[jsonapi("relationship,reviewer,data,people")]
        reviewer: Option<Uuid>,
    }
}

#[test]
fn test_unparseable_uuids_are_reported_everywhere() {
    let root = codec::from_str(
        r#"{"data": {
            "type": "tickets", "id": "not-a-uuid",
            "attributes": {"owner": 5, "watchers": ["67e55044-10b1-426f-9247-bb680e5fe0c8", 7]},
            "relationships": {"reviewer": {"data": {"type": "people", "id": "nope"}}}
        }}"#,
    )
    .unwrap();

    let mut decoded = Ticket::default();
    let report = decode(&root, &mut decoded).unwrap();
    assert_eq!(
        report.defaulted(),
        ["id", "attributes.owner", "attributes.watchers", "relationships.reviewer"]
    );
    assert_eq!(decoded.id, Some(Uuid::nil()));
    assert!(decoded.owner.is_nil());
    assert_eq!(decoded.watchers[1], Uuid::nil());
    assert_eq!(decoded.reviewer, Some(Uuid::nil()));

    let err = Decoder::new()
        .options(DecodeOptions::strict())
        .decode(&root, &mut Ticket::default())
        .unwrap_err();
    assert_eq!(err, Error::Coercion { member: "id".to_string() });
}

#[test]
fn test_numeric_uuid_attribute_fails_strict() {
    let id = "67e55044-10b1-426f-9247-bb680e5fe0c8";
    let root = codec::from_str(&format!(
        r#"{{"data": {{"type": "tickets", "id": "{id}", "attributes": {{"owner": 5}}}}}}"#
    ))
    .unwrap();

    let mut decoded = Ticket::default();
    let report = decode(&root, &mut decoded).unwrap();
    assert_eq!(report.defaulted(), ["attributes.owner"]);
    assert_eq!(decoded.id, Some(Uuid::parse_str(id).unwrap()));

    let err = Decoder::new()
        .options(DecodeOptions::strict())
        .decode(&root, &mut Ticket::default())
        .unwrap_err();
    assert_eq!(
        err,
        Error::Coercion {
            member: "attributes.owner".to_string()
        }
    );
}

#[test]
fn test_hand_built_document_decodes() {
    let resource = jsonapi_tag::ResourceBuilder::new("test", "5")
        .attribute("first", 1.9)
        .attribute("second", 10)
        .relationship("many", |r| r.to_many("other", "1").to_many("other", "2"))
        .relationship("one", |r| r.empty_to_one())
        .build()
        .unwrap();
    let root = Root::one(resource);

    let mut decoded = Test {
        one_rel: 77,
        ..Test::default()
    };
    decode(&root, &mut decoded).unwrap();
    assert_eq!(
        decoded,
        Test {
            id: 5,
            first: 1,
            second: "10".to_string(),
            one_rel: 77,
            many_rels: vec![1, 2],
        }
    );
}

#[test]
fn test_wire_cardinality_detection() {
    let root = codec::from_str(
        r#"{"data": {"type": "a", "id": "1", "relationships": {
            "one": {"data": {"type": "b", "id": "2"}},
            "none": {"data": null},
            "many": {"data": []},
            "links_only": {"links": {"self": "/x"}}
        }}}"#,
    )
    .unwrap();

    let resource = root.data.as_ref().unwrap().single().unwrap().unwrap();
    let data = |name: &str| resource.relationships.get(name).unwrap().data.clone();
    assert_eq!(data("one").unwrap().cardinality(), Cardinality::ToOne);
    assert_eq!(data("none"), Some(ResourceLinkage::ToOne(None)));
    assert_eq!(data("many"), Some(ResourceLinkage::ToMany(vec![])));
    assert_eq!(data("links_only"), None);

    assert_eq!(
        codec::to_string(&Root { data: Some(Resources::many()), ..Root::new() }).unwrap(),
        r#"{"data":[]}"#
    );
}
