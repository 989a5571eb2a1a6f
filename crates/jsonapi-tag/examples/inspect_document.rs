//! Simple inspector for JSON:API documents.

use std::collections::BTreeMap;
use std::fs;

use jsonapi_tag::{LinkValue, Resource, ResourceLinkage, Resources, codec, validate_root};
use serde_json::Value;

fn format_value(v: &Value) -> String {
    match v {
        Value::String(s) => {
            let preview: String = s.chars().take(80).collect();
            if s.chars().count() > 80 {
                format!("\"{}...\"", preview)
            } else {
                format!("\"{}\"", preview)
            }
        }
        Value::Array(items) => format!("ARRAY[{}]", items.len()),
        Value::Object(members) => format!("OBJECT{{{}}}", members.len()),
        other => other.to_string(),
    }
}

fn format_linkage(linkage: Option<&ResourceLinkage>) -> String {
    match linkage {
        None => "no data".to_string(),
        Some(ResourceLinkage::ToOne(None)) => "null".to_string(),
        Some(ResourceLinkage::ToOne(Some(identifier))) => {
            format!("{}/{}", identifier.resource_type, identifier.id)
        }
        Some(ResourceLinkage::ToMany(identifiers)) => format!("{} identifiers", identifiers.len()),
    }
}

fn print_resource(index: usize, resource: &Resource) {
    println!("[{}] {} {}", index, resource.resource_type, resource.id);
    for (key, value) in resource.attributes.iter().take(5) {
        println!("      {} = {}", key, format_value(value));
    }
    if resource.attributes.len() > 5 {
        println!("      ... and {} more attributes", resource.attributes.len() - 5);
    }
    for (name, relationship) in resource.relationships.iter() {
        println!("      -> {}: {}", name, format_linkage(relationship.data.as_ref()));
    }
    for (name, link) in resource.links.iter() {
        match link {
            LinkValue::Href(href) => println!("      link {}: {}", name, href),
            LinkValue::Object(link) => println!("      link {}: {} (+{} meta)", name, link.href, link.meta.len()),
        }
    }
}

fn main() {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "../../data/articles.json".to_string());

    println!("Reading: {}", path);

    let data = fs::read(&path).expect("Failed to read file");
    println!("File size: {} bytes", data.len());

    let root = codec::from_slice(&data).expect("Failed to parse document");

    println!("\n=== Document ===");
    match &root.data {
        None => println!("Data: absent"),
        Some(Resources::One(None)) => println!("Data: null"),
        Some(Resources::One(Some(_))) => println!("Data: single resource"),
        Some(Resources::Many(resources)) => println!("Data: collection of {}", resources.len()),
    }
    println!("Top-level links: {}", root.links.len());
    println!("Top-level meta: {}", root.meta.len());
    match validate_root(&root) {
        Ok(()) => println!("Validation: ok"),
        Err(e) => println!("Validation: {}", e),
    }

    let mut by_type: BTreeMap<&str, usize> = BTreeMap::new();
    for resource in root.resources() {
        *by_type.entry(resource.resource_type.as_str()).or_default() += 1;
    }

    println!("\n=== Resources by type ===");
    for (resource_type, count) in &by_type {
        println!("  {}: {}", resource_type, count);
    }

    println!("\n=== First 20 Resources (detail) ===");
    for (i, resource) in root.resources().take(20).enumerate() {
        print_resource(i, resource);
    }
}
