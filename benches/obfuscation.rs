// Copyright 2025
// SPDX-License-Identifier: Apache-2.0
//
// Criterion benchmarks for obfuscation performance

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use serde_json::{json, Value};
use std::hint::black_box;

use obfuscation_rust::obfuscation::{
    compile_rules, redact_text, redact_value, CompiledRules, DataType, ObfuscationMethod,
    ObfuscationRule,
};

fn create_test_rules() -> Vec<ObfuscationRule> {
    [
        (DataType::Ssn, ObfuscationMethod::CategoryLabel),
        (DataType::Email, ObfuscationMethod::Asterisks),
        (DataType::CreditCard, ObfuscationMethod::ReplaceLastN),
        (DataType::Phone, ObfuscationMethod::Hash),
        (DataType::IpAddress, ObfuscationMethod::Remove),
    ]
    .into_iter()
    .filter_map(|(data_type, method)| ObfuscationRule::for_data_type(data_type, method))
    .map(|rule| rule.with_last_n(4))
    .collect()
}

fn create_payload() -> Value {
    json!({
        "user": {
            "ssn": "123-45-6789",
            "email": "john.doe@example.com",
            "phone": "555-123-4567",
            "address": "123 Main St, Anytown, USA",
            "credit_card": "4111-1111-1111-1111",
            "notes": "Customer called regarding account issue"
        },
        "metadata": {
            "ip_address": "192.168.1.100",
            "timestamp": "2025-01-15T10:30:00Z",
            "request_id": "abc123"
        },
        "history": ["login from 10.0.0.1", "email changed to a@b.io", 42, null]
    })
}

fn bench_rule_compilation(c: &mut Criterion) {
    let rules = create_test_rules();

    c.bench_function("rule_compilation", |b| {
        b.iter(|| compile_rules(black_box(&rules)))
    });
}

fn bench_single_string(c: &mut Criterion) {
    let rules = compile_rules(&create_test_rules());
    let text = "My SSN is 123-45-6789";

    c.bench_function("redact_single_ssn", |b| {
        b.iter(|| redact_text(black_box(text), black_box(&rules)))
    });
}

fn bench_no_match(c: &mut Criterion) {
    let rules = compile_rules(&create_test_rules());
    let text = "This is just normal text without any sensitive information whatsoever. \
                It contains nothing that should be rewritten. Just plain English text.";

    c.bench_function("redact_no_match", |b| {
        b.iter(|| redact_text(black_box(text), black_box(&rules)))
    });
}

fn bench_large_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("large_text");
    let rules = compile_rules(&create_test_rules());

    for size in [100, 500, 1000, 5000].iter() {
        let mut text = String::new();
        for i in 0..*size {
            text.push_str(&format!(
                "User {}: SSN {:03}-45-6789, Email user{}@example.com, Phone: 555-{:03}-{:04}\n",
                i,
                i % 1000,
                i,
                i % 1000,
                i % 10000
            ));
        }

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| redact_text(black_box(text), black_box(&rules)))
        });
    }

    group.finish();
}

fn bench_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("methods");
    let text = "Contact john@example.com or jane@example.org";

    let methods = [
        ObfuscationMethod::Asterisks,
        ObfuscationMethod::ReplaceFirstN,
        ObfuscationMethod::Remove,
        ObfuscationMethod::Hash,
        ObfuscationMethod::RandomChars,
        ObfuscationMethod::CategoryLabel,
    ];

    for method in methods {
        let name = method.as_str().to_string();
        let rules: CompiledRules = compile_rules(
            &ObfuscationRule::for_data_type(DataType::Email, method)
                .map(|rule| vec![rule.with_first_n(3)])
                .unwrap_or_default(),
        );

        group.bench_with_input(BenchmarkId::new("method", name), &rules, |b, rules| {
            b.iter(|| redact_text(black_box(text), black_box(rules)))
        });
    }

    group.finish();
}

fn bench_nested_payload(c: &mut Criterion) {
    let rules = compile_rules(&create_test_rules());
    let payload = create_payload();

    c.bench_function("realistic_api_payload", |b| {
        b.iter(|| redact_value(black_box(payload.clone()), black_box(&rules)))
    });
}

criterion_group!(
    benches,
    bench_rule_compilation,
    bench_single_string,
    bench_no_match,
    bench_large_text,
    bench_methods,
    bench_nested_payload,
);

criterion_main!(benches);
