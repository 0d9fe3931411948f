use colored::Color;
use schema::function_spec::PUBSUB_TRIGGER;
use schema::info::ConsolidatedInfo;
use std::collections::BTreeMap;
use utility::types::meta::ObjectMeta;

/// FormatOptions how a consolidated record is rendered
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatOptions {
    /// emit ANSI color escapes
    pub color: bool,
    /// include labels, annotations and metadata
    pub verbose: bool,
}

impl Default for FormatOptions {
    fn default() -> Self {
        FormatOptions {
            color: true,
            verbose: false,
        }
    }
}

/// turns `targetPort` into `Target Port`
pub fn to_multiple_words(word: &str) -> String {
    let mut res = String::with_capacity(word.len() + 2);
    for (i, c) in word.chars().enumerate() {
        if i == 0 {
            res.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            res.push(' ');
            res.push(c);
        } else {
            res.push(c);
        }
    }
    res
}

const UNDERLINE: &str = "4";
const RESET: &str = "\x1b[0m";

// written out directly: `Colorize` output also depends on the terminal and NO_COLOR
fn paint(text: &str, codes: &[&str]) -> String {
    format!("\x1b[{}m{}{}", codes.join(";"), text, RESET)
}

fn key(text: &str, options: FormatOptions) -> String {
    if options.color {
        let yellow = Color::Yellow.to_fg_str();
        paint(text, &[yellow.as_ref()])
    } else {
        text.to_string()
    }
}

fn heading(text: &str, options: FormatOptions) -> String {
    if options.color {
        let yellow = Color::Yellow.to_fg_str();
        paint(text, &[UNDERLINE, yellow.as_ref()])
    } else {
        text.to_string()
    }
}

fn push_entries(
    message: &mut String,
    title: &str,
    entries: &BTreeMap<String, String>,
    options: FormatOptions,
) {
    if entries.is_empty() {
        return;
    }
    message.push_str(key(title, options).as_str());
    message.push('\n');
    for (k, v) in entries {
        let label = format!("  {}:", k);
        message.push_str(format!("{} {}\n", key(label.as_str(), options), v).as_str());
    }
}

fn push_metadata(message: &mut String, title: &str, meta: &ObjectMeta, options: FormatOptions) {
    message.push_str(format!("{}\n", key(title, options)).as_str());
    message.push_str(format!("  {} {}\n", key("Self Link:", options), meta.self_link).as_str());
    message.push_str(format!("  {} {}\n", key("UID:", options), meta.uid).as_str());
    message.push_str(
        format!(
            "  {} {}",
            key("Timestamp:", options),
            meta.creation_timestamp
        )
        .as_str(),
    );
}

/// renders one consolidated record; identical input always gives identical output
pub fn format_message(info: &ConsolidatedInfo, options: FormatOptions) -> String {
    let service = &info.service;
    let function = &info.function;
    let mut message = String::new();

    let title = format!("Service Information \"{}\"", service.metadata.name);
    message.push_str(format!("\n{}\n", heading(title.as_str(), options)).as_str());
    message.push_str(
        format!("{} {}\n", key("Cluster IP:", options), service.spec.cluster_ip).as_str(),
    );
    message.push_str(format!("{} {}\n", key("Type:", options), service.spec.service_type).as_str());
    message.push_str(format!("{}\n", key("Ports:", options)).as_str());
    for port in &service.spec.ports {
        for (name, value) in port.fields() {
            let label = format!("  {}:", to_multiple_words(name));
            message.push_str(format!("{} {}\n", key(label.as_str(), options), value).as_str());
        }
    }
    if options.verbose {
        push_entries(
            &mut message,
            "Labels:",
            &service.metadata.labels,
            options,
        );
        push_metadata(&mut message, "Metadata:", &service.metadata, options);
        message.push('\n');
    }

    message.push_str(format!("{}\n", heading("Function Info", options)).as_str());
    if let Some(url) = &info.url {
        message.push_str(format!("{} {}\n", key("URL:", options), url).as_str());
    }
    if let Some(description) = function.description() {
        message.push_str(format!("{} {}\n", key("Description:", options), description).as_str());
    }
    if options.verbose {
        push_entries(
            &mut message,
            "Labels:",
            &function.metadata.labels,
            options,
        );
        push_entries(
            &mut message,
            "Annotations:",
            &function.metadata.annotations,
            options,
        );
    }
    message.push_str(format!("{} {}\n", key("Handler:", options), function.spec.handler).as_str());
    message.push_str(format!("{} {}\n", key("Runtime:", options), function.spec.runtime).as_str());
    if function.spec.trigger_type == PUBSUB_TRIGGER && !function.spec.topic.is_empty() {
        message.push_str(
            format!("{} {}\n", key("Topic Trigger:", options), function.spec.topic).as_str(),
        );
    } else {
        message.push_str(
            format!("{} {}\n", key("Trigger:", options), function.spec.trigger_type).as_str(),
        );
    }
    message.push_str(format!("{} {}", key("Dependencies:", options), function.spec.deps).as_str());
    if options.verbose {
        message.push('\n');
        push_metadata(&mut message, "Metadata:", &function.metadata, options);
    }
    message
}
