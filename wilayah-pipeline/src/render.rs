//! Markdown rendering of the two reports, with Indonesian number
//! formatting ("31.700,00", "Rp 1.234.567,89").

use crate::classifier::{ClassifiedItem, Label};
use crate::ranking::RegionTopList;

/// Group an integer's digits with dot separators: 1234567 -> "1.234.567".
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut grouped = String::new();
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    grouped.chars().rev().collect()
}

/// Format a number in the Indonesian locale with two decimals.
pub fn format_locale(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;
    format!(
        "{}{},{:02}",
        if negative { "-" } else { "" },
        group_thousands(whole),
        frac
    )
}

/// Format a monetary value as Rupiah.
pub fn format_rupiah(value: f64) -> String {
    format!("Rp {}", format_locale(value))
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(2)).collect();
        format!("{}..", cut)
    }
}

/// Render the per-region top-N lists as Markdown tables, one section per
/// region in canonical order. Inactive regions are skipped.
pub fn render_top_markdown(tops: &[RegionTopList]) -> String {
    let mut out = String::from("## Item Terlaris per Wilayah\n");
    for top in tops {
        if top.items.is_empty() {
            continue;
        }
        out.push_str(&format!("\n### {}\n\n", top.region.name()));
        out.push_str("| Rank | Kode Item | Deskripsi | Transaksi | Qty | Harga | Nilai Total |\n");
        out.push_str("|-----:|-----------|-----------|----------:|----:|------:|------------:|\n");
        for (rank, item) in top.items.iter().enumerate() {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} | {} |\n",
                rank + 1,
                item.code,
                truncate(&item.description, 40),
                group_thousands(item.transactions),
                format_locale(item.qty_total),
                format_rupiah(item.first_price),
                format_rupiah(item.value_total),
            ));
        }
    }
    out
}

/// Render the classification summary: label distribution plus the top
/// Global and Local items by transaction count.
pub fn render_classification_markdown(items: &[ClassifiedItem], limit: usize) -> String {
    let mut out = String::from("## Klasifikasi Distribusi Item\n\n");

    out.push_str("| Label | Jumlah Item |\n|-------|------------:|\n");
    for label in [Label::Global, Label::Regional, Label::Local, Label::LowVolume] {
        let count = items.iter().filter(|i| i.label == label).count();
        out.push_str(&format!("| {} | {} |\n", label, group_thousands(count as u64)));
    }

    for (heading, label) in [("Item Global Teratas", Label::Global), ("Item Local Teratas", Label::Local)] {
        let selected: Vec<&ClassifiedItem> = items
            .iter()
            .filter(|i| i.label == label)
            .take(limit)
            .collect();
        if selected.is_empty() {
            continue;
        }
        out.push_str(&format!("\n### {}\n\n", heading));
        out.push_str("| Kode Item | Deskripsi | Transaksi | H_norm | Max Share | Wilayah Dominan |\n");
        out.push_str("|-----------|-----------|----------:|-------:|----------:|-----------------|\n");
        for item in selected {
            let dominan = item
                .dominant_regions
                .iter()
                .map(|r| r.name())
                .collect::<Vec<_>>()
                .join(", ");
            out.push_str(&format!(
                "| {} | {} | {} | {:.3} | {:.3} | {} |\n",
                item.profile.code,
                truncate(&item.profile.description, 40),
                group_thousands(item.metrics.total),
                item.metrics.h_norm,
                item.metrics.max_share,
                dominan,
            ));
        }
    }
    out
}
