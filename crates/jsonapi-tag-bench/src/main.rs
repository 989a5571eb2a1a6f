//! Benchmark for JSON:API encoding and decoding using city data.
//!
//! Loads a cities dump, maps every city onto a tagged record, and times the
//! encode, serialize, parse, and decode stages over the whole collection.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use std::time::Instant;

use jsonapi_tag::codec::{self, DecodeOptions, Decoder, EncodeOptions, Encoder};
use jsonapi_tag::{Json, Root};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

// =============================================================================
// JSON DATA STRUCTURES
// =============================================================================

#[derive(Debug, Deserialize)]
struct City {
    id: u32,
    name: String,
    state_id: u32,
    country_id: u32,
    latitude: String,
    longitude: String,
    native: Option<String>,
    #[serde(rename = "type")]
    city_type: Option<String>,
    population: Option<i64>,
    timezone: Option<String>,
    translations: Option<HashMap<String, String>>,
    #[serde(rename = "wikiDataId")]
    wikidata_id: Option<String>,
}

jsonapi_tag::record! {
    #[derive(Debug, Default, Clone, PartialEq)]
    struct CityRecord {
        #[jsonapi("identifier,cities")]
        id: u32,
        #[jsonapi("attribute,name")]
        name: String,
        #[jsonapi("attribute,native")]
        native: Option<String>,
        #[jsonapi("attribute,kind")]
        city_type: Option<String>,
        #[jsonapi("attribute,population")]
        population: Option<i64>,
        #[jsonapi("attribute,latitude")]
        latitude: f64,
        #[jsonapi("attribute,longitude")]
        longitude: f64,
        #[jsonapi("attribute,timezone")]
        timezone: Option<String>,
        #[jsonapi("attribute,translations")]
        translations: Json<BTreeMap<String, String>>,
        #[jsonapi("relationship,state,data,states")]
        state_id: u32,
        #[jsonapi("relationship,country,data,countries")]
        country_id: u32,
        #[jsonapi("link,self")]
        url: String,
        #[jsonapi("meta,wikidata")]
        wikidata_id: Option<String>,
    }
}

// =============================================================================
// CONVERSION
// =============================================================================

fn to_record(city: City) -> CityRecord {
    CityRecord {
        id: city.id,
        url: format!("/cities/{}", city.id),
        name: city.name,
        native: city.native.filter(|native| !native.is_empty()),
        city_type: city.city_type,
        population: city.population,
        latitude: city.latitude.parse().unwrap_or_default(),
        longitude: city.longitude.parse().unwrap_or_default(),
        timezone: city.timezone,
        translations: Json(city.translations.unwrap_or_default().into_iter().collect()),
        state_id: city.state_id,
        country_id: city.country_id,
        wikidata_id: city.wikidata_id,
    }
}

fn count_members(root: &Root) -> (usize, usize) {
    root.resources().fold((0, 0), |(attributes, relationships), resource| {
        (
            attributes + resource.attributes.len(),
            relationships + resource.relationships.len(),
        )
    })
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .try_init();
}

fn main() {
    init_tracing();

    let data_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "../../../out/cities.json".to_string());

    println!("Loading cities from: {}", data_path);

    let json_data = fs::read_to_string(&data_path).expect("Failed to read cities.json");

    let parse_start = Instant::now();
    let cities: Vec<City> = serde_json::from_str(&json_data).expect("Failed to parse JSON");
    let parse_time = parse_start.elapsed();

    println!("Loaded {} cities in {:?}", cities.len(), parse_time);

    let convert_start = Instant::now();
    let records: Vec<CityRecord> = cities.into_iter().map(to_record).collect();
    let convert_time = convert_start.elapsed();

    println!("Converted to {} records in {:?}", records.len(), convert_time);

    // Benchmark encoding (records to document)
    let encode_start = Instant::now();
    let root = Encoder::new().encode_many(&records).expect("Failed to encode");
    let encode_time = encode_start.elapsed();

    let (attribute_count, relationship_count) = count_members(&root);
    println!("\nEncode: {} resources in {:?}", records.len(), encode_time);
    println!(
        "  - {} attributes, {} relationships",
        attribute_count, relationship_count
    );

    let compact = Encoder::new()
        .options(EncodeOptions::omit_null_attributes())
        .encode_many(&records)
        .expect("Failed to encode");
    let (compact_attributes, _) = count_members(&compact);
    println!(
        "  - {} attributes with null attributes omitted",
        compact_attributes
    );

    // Benchmark serialization
    let serialize_start = Instant::now();
    let bytes = codec::to_vec(&root).expect("Failed to serialize");
    let serialize_time = serialize_start.elapsed();

    println!("\nSerialize: {} bytes in {:?}", bytes.len(), serialize_time);
    println!(
        "  Throughput: {:.2} MB/s",
        (bytes.len() as f64 / 1_000_000.0) / serialize_time.as_secs_f64()
    );

    // Benchmark parse + decode
    const DECODE_ITERS: u32 = 10;

    // Warmup
    for _ in 0..3 {
        let _ = codec::from_slice(&bytes).expect("Failed to parse document");
    }

    let parse_doc_start = Instant::now();
    let mut parsed = None;
    for _ in 0..DECODE_ITERS {
        parsed = Some(codec::from_slice(&bytes).expect("Failed to parse document"));
    }
    let parse_doc_time = parse_doc_start.elapsed() / DECODE_ITERS;
    let parsed = parsed.expect("at least one iteration");

    println!(
        "\nParse: {:?} (avg of {} iterations)",
        parse_doc_time, DECODE_ITERS
    );
    println!(
        "  Throughput: {:.2} MB/s",
        (bytes.len() as f64 / 1_000_000.0) / parse_doc_time.as_secs_f64()
    );

    jsonapi_tag::validate_root(&parsed).expect("Parsed document is invalid");

    let decoder = Decoder::new().options(DecodeOptions::strict());
    let mut decoded: Vec<CityRecord> = Vec::new();
    let decode_start = Instant::now();
    for _ in 0..DECODE_ITERS {
        let report = decoder.decode_many(&parsed, &mut decoded).expect("Failed to decode");
        assert!(report.is_clean());
    }
    let decode_time = decode_start.elapsed() / DECODE_ITERS;

    println!(
        "\nDecode: {:?} (avg of {} iterations)",
        decode_time, DECODE_ITERS
    );
    println!(
        "  Records/s: {:.0}",
        decoded.len() as f64 / decode_time.as_secs_f64()
    );

    assert_eq!(decoded.len(), records.len());
    let mismatched = decoded
        .iter()
        .zip(&records)
        .filter(|(decoded, original)| decoded != original)
        .count();
    println!("  Records differing after round-trip: {}", mismatched);

    // Write output file
    let input_path = Path::new(&data_path);
    let stem = input_path.file_stem().unwrap_or_default().to_string_lossy();
    let parent = input_path.parent().unwrap_or(Path::new("."));
    let output = parent.join(format!("{}.jsonapi.json", stem));

    fs::write(&output, &bytes).expect("Failed to write output file");

    println!("\n=== Output File ===");
    println!("Document: {}", output.display());
}
