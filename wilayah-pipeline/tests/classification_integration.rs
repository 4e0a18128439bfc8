//! End-to-end pipeline tests: CSV text in, labeled report rows out.

use wilayah_metrics::ClassifierConfig;
use wilayah_pipeline::aggregator::aggregate;
use wilayah_pipeline::classifier::{classify_profiles, Classifier, Label};
use wilayah_pipeline::ledger::load_ledger;
use wilayah_pipeline::ranking::top_items_per_region;
use wilayah_pipeline::region::Region;
use wilayah_pipeline::report::{read_profile_csv, write_profile_csv};

// ---------------------------------------------------------------------------
// Test data fixtures
// ---------------------------------------------------------------------------

/// Build a ledger CSV covering every classification bucket:
/// - GLB-1: 8 transactions in each of 5 regions (even spread -> Global)
/// - LOC-1: 35 transactions, all in Jakarta Utara (-> Local)
/// - REG-1: 20/12/8 across three regions (-> Regional)
/// - LOW-1: 4 transactions (-> Low-Volume)
fn sample_ledger() -> String {
    let mut csv = String::from(
        "idtransaksi,JenisTransaksi,Kodeitem,Deskripsi,Qty,Harga, Nilai,LokasiAlamatToko\n",
    );
    let mut txn = 0;
    let mut push_rows = |item: &str, desc: &str, location: &str, rows: usize| {
        for _ in 0..rows {
            txn += 1;
            csv.push_str(&format!(
                "T{:04},Pembelian,{},{},1,\"10.000,00\",\"10.000,00\",{}\n",
                txn, item, desc, location
            ));
        }
    };

    for location in [
        "Jl. Thamrin, Jakarta Pusat",
        "Cakung, Jakarta Timur",
        "Kebon Jeruk, Jakarta Barat",
        "Kebayoran, Jakarta Selatan",
        "Kelapa Gading, Jakarta Utara",
    ] {
        push_rows("GLB-1", "Binder Clip 107", location, 8);
    }
    push_rows("LOC-1", "Stapler HD-10", "Sunter, Jakarta Utara", 35);
    push_rows("REG-1", "Spidol Boardmarker", "Menteng, Jakarta Pusat", 20);
    push_rows("REG-1", "Spidol Boardmarker", "Pulo Gadung, Jakarta Timur", 12);
    push_rows("REG-1", "Spidol Boardmarker", "Tambora, Jakarta Barat", 8);
    push_rows("LOW-1", "Cutter A-300", "Gambir, Jakarta Pusat", 4);
    csv
}

fn run_pipeline(csv: &str) -> Vec<wilayah_pipeline::ClassifiedItem> {
    let (records, _) = load_ledger(csv.as_bytes()).unwrap();
    let agg = aggregate(&records, false);
    let classifier = Classifier::new(ClassifierConfig::default()).unwrap();
    classify_profiles(agg.profiles, &agg.baseline, &classifier)
}

fn find<'a>(
    items: &'a [wilayah_pipeline::ClassifiedItem],
    code: &str,
) -> &'a wilayah_pipeline::ClassifiedItem {
    items
        .iter()
        .find(|i| i.profile.code == code)
        .unwrap_or_else(|| panic!("item {} missing from output", code))
}

// ---------------------------------------------------------------------------
// Classification scenarios
// ---------------------------------------------------------------------------

#[test]
fn every_bucket_is_assigned_as_expected() {
    let items = run_pipeline(&sample_ledger());
    assert_eq!(items.len(), 4);

    let global = find(&items, "GLB-1");
    assert_eq!(global.label, Label::Global);
    assert_eq!(global.metrics.presence_count, 5);
    assert!((global.metrics.h_norm - 1.0).abs() < 1e-9);
    assert!((global.metrics.max_share - 0.20).abs() < 1e-9);

    let local = find(&items, "LOC-1");
    assert_eq!(local.label, Label::Local);
    assert_eq!(local.metrics.presence_count, 1);
    assert_eq!(local.metrics.h_norm, 0.0);
    assert!((local.metrics.max_share - 1.0).abs() < 1e-12);
    assert_eq!(local.dominant_regions, vec![Region::JakartaUtara]);

    let regional = find(&items, "REG-1");
    assert_eq!(regional.label, Label::Regional);
    assert_eq!(regional.metrics.presence_count, 3);
    assert!((regional.metrics.max_share - 0.50).abs() < 1e-9);

    let low = find(&items, "LOW-1");
    assert_eq!(low.label, Label::LowVolume);
    assert_eq!(low.metrics.total, 4);
}

#[test]
fn every_item_gets_exactly_one_label_and_counts_balance() {
    let items = run_pipeline(&sample_ledger());
    for item in &items {
        let sum: u64 = item.profile.counts_by_region.iter().sum();
        assert_eq!(sum, item.metrics.total);
        assert!((0.0..=1.0).contains(&item.metrics.h_norm));
        assert!((0.0..=1.0).contains(&item.metrics.max_share));
    }
}

#[test]
fn rerunning_the_pipeline_yields_identical_labels() {
    let csv = sample_ledger();
    let first = run_pipeline(&csv);
    let second = run_pipeline(&csv);
    assert_eq!(first.len(), second.len());
    for (a, b) in first.iter().zip(&second) {
        assert_eq!(a.profile.code, b.profile.code);
        assert_eq!(a.label, b.label);
        assert_eq!(a.metrics.h_norm, b.metrics.h_norm);
    }
}

#[test]
fn output_is_sorted_by_transaction_count_descending() {
    let items = run_pipeline(&sample_ledger());
    let totals: Vec<u64> = items.iter().map(|i| i.metrics.total).collect();
    let mut sorted = totals.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(totals, sorted);
}

#[test]
fn retur_rows_flip_an_item_below_the_volume_threshold() {
    // 32 purchase rows + 3 retur rows in one region. Excluding returns the
    // item stays Local at 32; including them it reaches 35.
    let mut csv = String::from("idtransaksi,JenisTransaksi,Kodeitem,Qty,Harga,LokasiAlamatToko\n");
    for i in 0..32 {
        csv.push_str(&format!(
            "P{:03},Pembelian,RTN-1,1,100,Jakarta Selatan\n",
            i
        ));
    }
    for i in 0..3 {
        csv.push_str(&format!("R{:03},Retur,RTN-1,1,100,Jakarta Selatan\n", i));
    }

    let (records, _) = load_ledger(csv.as_bytes()).unwrap();
    let classifier = Classifier::new(ClassifierConfig::default()).unwrap();

    let excluded = aggregate(&records, false);
    assert_eq!(excluded.summary.retur_excluded, 3);
    let items = classify_profiles(excluded.profiles, &excluded.baseline, &classifier);
    assert_eq!(items[0].metrics.total, 32);
    assert_eq!(items[0].label, Label::Local);

    let included = aggregate(&records, true);
    let items = classify_profiles(included.profiles, &included.baseline, &classifier);
    assert_eq!(items[0].metrics.total, 35);
}

// ---------------------------------------------------------------------------
// Report round-trip
// ---------------------------------------------------------------------------

#[test]
fn written_report_round_trips_into_the_profile_set() {
    let items = run_pipeline(&sample_ledger());
    let mut buf = Vec::new();
    write_profile_csv(&mut buf, &items).unwrap();
    let rows = read_profile_csv(buf.as_slice()).unwrap();

    assert_eq!(rows.len(), items.len());
    for (row, item) in rows.iter().zip(&items) {
        assert_eq!(row.kodeitem, item.profile.code);
        assert_eq!(row.counts(), item.profile.counts_by_region);
        assert_eq!(row.h_norm, item.metrics.h_norm);
        assert_eq!(row.max_share, item.metrics.max_share);
        assert_eq!(row.lq_max, item.metrics.lq_max);
        assert_eq!(row.parsed_label(), Ok(item.label));
        assert_eq!(row.dominant_regions(), item.dominant_regions);
    }
}

// ---------------------------------------------------------------------------
// Top-N ranking over the same aggregation
// ---------------------------------------------------------------------------

#[test]
fn top_lists_rank_by_regional_transactions() {
    let (records, _) = load_ledger(sample_ledger().as_bytes()).unwrap();
    let agg = aggregate(&records, false);
    let tops = top_items_per_region(&agg.profiles, 5);

    // Jakarta Pusat activity: REG-1 (20), GLB-1 (8), LOW-1 (4).
    let pusat = &tops[Region::JakartaPusat.index()];
    let codes: Vec<&str> = pusat.items.iter().map(|i| i.code.as_str()).collect();
    assert_eq!(codes, vec!["REG-1", "GLB-1", "LOW-1"]);

    // Jakarta Utara: LOC-1 (35) ahead of GLB-1 (8).
    let utara = &tops[Region::JakartaUtara.index()];
    assert_eq!(utara.items[0].code, "LOC-1");
    assert_eq!(utara.items[0].transactions, 35);

    // Kepulauan Seribu never appears in the fixture.
    assert!(tops[Region::KepulauanSeribu.index()].items.is_empty());
}
