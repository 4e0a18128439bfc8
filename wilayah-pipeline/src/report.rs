//! Report serialization.
//!
//! The classification CSV is the serialized form of the classified profile
//! set and must round-trip losslessly: floats are written at full precision
//! and `read_profile_csv` restores the exact row set, which the tests rely
//! on.

use std::io::{Read, Write};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::classifier::{ClassifiedItem, Label};
use crate::error::PipelineResult;
use crate::ranking::RegionTopList;
use crate::region::Region;

/// One row of the classification report. Field order fixes the CSV columns;
/// the trailing `trx_*` columns follow the canonical region order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileRow {
    pub kodeitem: String,
    pub deskripsi: String,
    pub transaksi_total: u64,
    pub presence_count: usize,
    pub h_norm: f64,
    pub max_share: f64,
    /// Dominant regions joined with ", "; ties keep every name.
    pub wilayah_dominan: String,
    pub lq_max: f64,
    pub label: String,
    pub trx_pusat: u64,
    pub trx_timur: u64,
    pub trx_barat: u64,
    pub trx_selatan: u64,
    pub trx_utara: u64,
    pub trx_kepulauan_seribu: u64,
}

impl ProfileRow {
    pub fn from_item(item: &ClassifiedItem) -> Self {
        let c = &item.profile.counts_by_region;
        Self {
            kodeitem: item.profile.code.clone(),
            deskripsi: item.profile.description.clone(),
            transaksi_total: item.metrics.total,
            presence_count: item.metrics.presence_count,
            h_norm: item.metrics.h_norm,
            max_share: item.metrics.max_share,
            wilayah_dominan: item
                .dominant_regions
                .iter()
                .map(|r| r.name())
                .collect::<Vec<_>>()
                .join(", "),
            lq_max: item.metrics.lq_max,
            label: item.label.to_string(),
            trx_pusat: c[Region::JakartaPusat.index()],
            trx_timur: c[Region::JakartaTimur.index()],
            trx_barat: c[Region::JakartaBarat.index()],
            trx_selatan: c[Region::JakartaSelatan.index()],
            trx_utara: c[Region::JakartaUtara.index()],
            trx_kepulauan_seribu: c[Region::KepulauanSeribu.index()],
        }
    }

    /// The per-region counts, back in canonical region order.
    pub fn counts(&self) -> [u64; Region::COUNT] {
        [
            self.trx_pusat,
            self.trx_timur,
            self.trx_barat,
            self.trx_selatan,
            self.trx_utara,
            self.trx_kepulauan_seribu,
        ]
    }

    /// Parse the joined dominant-region names back into regions.
    pub fn dominant_regions(&self) -> Vec<Region> {
        self.wilayah_dominan
            .split(',')
            .filter_map(|name| Region::from_str(name).ok())
            .collect()
    }

    pub fn parsed_label(&self) -> Result<Label, String> {
        self.label.parse()
    }
}

/// Write the classification report.
pub fn write_profile_csv<W: Write>(writer: W, items: &[ClassifiedItem]) -> PipelineResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for item in items {
        csv_writer.serialize(ProfileRow::from_item(item))?;
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// Read a classification report back into rows.
pub fn read_profile_csv<R: Read>(reader: R) -> PipelineResult<Vec<ProfileRow>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        rows.push(result?);
    }
    Ok(rows)
}

/// One row of the per-region top-N report.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TopRow {
    pub wilayah: String,
    pub rank: usize,
    pub kodeitem: String,
    pub deskripsi: String,
    pub transaksi: u64,
    pub qty_total: f64,
    pub harga_first: f64,
    pub nilai_total: f64,
}

/// Write the per-region top-N report.
pub fn write_top_csv<W: Write>(writer: W, tops: &[RegionTopList]) -> PipelineResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for top in tops {
        for (rank, item) in top.items.iter().enumerate() {
            csv_writer.serialize(TopRow {
                wilayah: top.region.name().to_string(),
                rank: rank + 1,
                kodeitem: item.code.clone(),
                deskripsi: item.description.clone(),
                transaksi: item.transactions,
                qty_total: item.qty_total,
                harga_first: item.first_price,
                nilai_total: item.value_total,
            })?;
        }
    }
    csv_writer.flush().map_err(csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wilayah_metrics::distribution::DistributionMetrics;

    use crate::aggregator::ItemProfile;

    fn item(code: &str, counts: [u64; 6], label: Label) -> ClassifiedItem {
        let total: u64 = counts.iter().sum();
        let max = counts.iter().copied().max().unwrap_or(0);
        let dominant: Vec<usize> = counts
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == max && c > 0)
            .map(|(i, _)| i)
            .collect();
        ClassifiedItem {
            profile: ItemProfile {
                code: code.to_string(),
                description: format!("Item {}", code),
                counts_by_region: counts,
                qty_by_region: [1.0; 6],
                value_by_region: [100.0; 6],
                total_transactions: total,
                first_price: 1500.0,
            },
            metrics: DistributionMetrics {
                total,
                presence_count: counts.iter().filter(|&&c| c > 0).count(),
                h_norm: 0.8321,
                max_share: max as f64 / total.max(1) as f64,
                dominant_regions: dominant.clone(),
                lq_max: 1.77,
            },
            dominant_regions: dominant.iter().map(|&i| Region::ALL[i]).collect(),
            label,
        }
    }

    #[test]
    fn profile_csv_round_trips_losslessly() {
        let items = vec![
            item("BTX-100", [10, 8, 9, 7, 6, 0], Label::Global),
            item("BTX-200", [40, 0, 0, 0, 0, 0], Label::Local),
            item("BTX-300", [15, 15, 5, 0, 0, 0], Label::Regional),
        ];
        let mut buf = Vec::new();
        write_profile_csv(&mut buf, &items).unwrap();
        let rows = read_profile_csv(buf.as_slice()).unwrap();

        assert_eq!(rows.len(), items.len());
        for (row, original) in rows.iter().zip(&items) {
            assert_eq!(row.kodeitem, original.profile.code);
            assert_eq!(row.counts(), original.profile.counts_by_region);
            assert_eq!(row.transaksi_total, original.metrics.total);
            assert_eq!(row.presence_count, original.metrics.presence_count);
            // Full-precision floats survive the trip bit-for-bit.
            assert_eq!(row.h_norm, original.metrics.h_norm);
            assert_eq!(row.max_share, original.metrics.max_share);
            assert_eq!(row.lq_max, original.metrics.lq_max);
            assert_eq!(row.parsed_label(), Ok(original.label));
            assert_eq!(row.dominant_regions(), original.dominant_regions);
        }
    }

    #[test]
    fn dominant_region_ties_serialize_jointly() {
        let tied = item("BTX-400", [15, 15, 5, 0, 0, 0], Label::Regional);
        let mut buf = Vec::new();
        write_profile_csv(&mut buf, &[tied]).unwrap();
        let rows = read_profile_csv(buf.as_slice()).unwrap();
        assert_eq!(rows[0].wilayah_dominan, "Jakarta Pusat, Jakarta Timur");
        assert_eq!(
            rows[0].dominant_regions(),
            vec![Region::JakartaPusat, Region::JakartaTimur]
        );
    }

    #[test]
    fn top_csv_has_one_row_per_ranked_item() {
        use crate::ranking::{RegionItemSales, RegionTopList};

        let tops = vec![RegionTopList {
            region: Region::JakartaPusat,
            items: vec![
                RegionItemSales {
                    region: Region::JakartaPusat,
                    code: "BTX-100".into(),
                    description: "Binder Clip".into(),
                    transactions: 12,
                    qty_total: 30.0,
                    first_price: 31700.0,
                    value_total: 950000.0,
                },
                RegionItemSales {
                    region: Region::JakartaPusat,
                    code: "BTX-200".into(),
                    description: "Stapler".into(),
                    transactions: 9,
                    qty_total: 10.0,
                    first_price: 12500.0,
                    value_total: 125000.0,
                },
            ],
        }];
        let mut buf = Vec::new();
        write_top_csv(&mut buf, &tops).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert!(lines.next().unwrap().starts_with("wilayah,rank"));
        assert!(lines.next().unwrap().starts_with("Jakarta Pusat,1,BTX-100"));
        assert!(lines.next().unwrap().starts_with("Jakarta Pusat,2,BTX-200"));
    }
}
