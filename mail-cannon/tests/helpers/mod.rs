#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::json;
use tempfile::TempDir;

pub const ADDRESS_HEADER: &str = "first_name,last_name,email,line_1,line_2,city,state,postal_code,country";

pub fn sku_names(count: usize) -> Vec<String> {
    (1..=count).map(|i| format!("SKU-{i:02}")).collect()
}

/// One CSV data line. `qty` sets (sku index, cell) pairs; other SKU cells stay blank.
pub fn csv_line(first: &str, email: &str, city: &str, qty: &[(usize, &str)]) -> String {
    let mut cells: Vec<String> = vec![
        first.into(),
        "Tester".into(),
        email.into(),
        "1 Main St".into(),
        String::new(),
        city.into(),
        "CA".into(),
        "94105".into(),
        "US".into(),
    ];
    let mut quantities = vec![String::new(); 12];
    for (i, q) in qty {
        quantities[*i] = (*q).to_string();
    }
    cells.extend(quantities);
    cells.join(",")
}

/// Scratch directory holding `config.json`, `orders.csv`, and a `logs` dir.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new(base_url: &str, sku_count: usize, lines: &[String]) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let config = json!({
            "theseus_base_url": base_url,
            "api_key": "sk_test_123",
            "tags": ["mail-cannon-test"],
            "skus": sku_names(sku_count),
        });
        fs::write(dir.path().join("config.json"), config.to_string()).expect("write config");

        let mut csv = format!("{ADDRESS_HEADER},{}\n", sku_names(12).join(","));
        for line in lines {
            csv.push_str(line);
            csv.push('\n');
        }
        fs::write(dir.path().join("orders.csv"), csv).expect("write csv");
        Self { dir }
    }

    pub fn config(&self) -> PathBuf {
        self.dir.path().join("config.json")
    }

    pub fn csv(&self) -> PathBuf {
        self.dir.path().join("orders.csv")
    }

    pub fn logs(&self) -> PathBuf {
        self.dir.path().join("logs")
    }
}

/// Two valid rows: A orders one SKU (qty 3), B orders two SKUs (qty 1 and 2).
pub fn two_valid_rows(email_b: &str) -> Vec<String> {
    vec![
        csv_line("Ann", "a@example.com", "Oakland", &[(0, "3")]),
        csv_line("Ben", email_b, "Berkeley", &[(1, "1"), (5, "2")]),
    ]
}

pub fn results_files(logs: &Path) -> Vec<PathBuf> {
    let mut out: Vec<PathBuf> = fs::read_dir(logs)
        .map(|entries| {
            entries
                .flatten()
                .map(|e| e.path())
                .filter(|p| p.to_string_lossy().ends_with("_results.json"))
                .collect()
        })
        .unwrap_or_default();
    out.sort();
    out
}
