//! End-to-end tests: read a trace, run a predictor, and check the results
//! against a straightforward integer model of each scheme.

use std::io::Write;

use bpsim::*;
use bpsim::report::Report;
use bpsim::sim::simulate;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// Plain integer model of the three schemes.
struct Model {
    k: usize,
    m1: usize,
    m2: usize,
    n: usize,
    chooser: Vec<u8>,
    gshare: Vec<u8>,
    bimodal: Vec<u8>,
    bhr: usize,
    misses: usize,
}

impl Model {
    fn new(k: usize, m1: usize, n: usize, m2: usize) -> Self {
        Self {
            k, m1, m2, n,
            chooser: vec![1; 1 << k],
            gshare: vec![2; 1 << m1],
            bimodal: vec![2; 1 << m2],
            bhr: 0,
            misses: 0,
        }
    }

    fn train(ctr: &mut u8, taken: bool) {
        if taken && *ctr < 3 { *ctr += 1; }
        if !taken && *ctr > 0 { *ctr -= 1; }
    }

    fn bimodal_index(&self, pc: usize) -> usize {
        (pc >> 2) & ((1 << self.m2) - 1)
    }

    fn gshare_index(&self, pc: usize) -> usize {
        let shift = self.m1 - self.n;
        let m_bits = (pc >> 2) & ((1 << self.m1) - 1);
        let n_bits = (m_bits >> shift) ^ self.bhr;
        (n_bits << shift) | (m_bits & ((1 << shift) - 1))
    }

    fn shift_history(&mut self, taken: bool) {
        self.bhr = (self.bhr >> 1) | ((taken as usize) << (self.n - 1));
    }

    fn bimodal(&mut self, pc: usize, taken: bool) {
        let idx = self.bimodal_index(pc);
        if (self.bimodal[idx] >= 2) != taken { self.misses += 1; }
        Self::train(&mut self.bimodal[idx], taken);
    }

    fn gshare(&mut self, pc: usize, taken: bool) {
        let idx = self.gshare_index(pc);
        if (self.gshare[idx] >= 2) != taken { self.misses += 1; }
        Self::train(&mut self.gshare[idx], taken);
        self.shift_history(taken);
    }

    fn hybrid(&mut self, pc: usize, taken: bool) {
        let b_idx = self.bimodal_index(pc);
        let g_idx = self.gshare_index(pc);
        let b_pred = self.bimodal[b_idx] >= 2;
        let g_pred = self.gshare[g_idx] >= 2;
        self.shift_history(taken);

        let c_idx = (pc >> 2) & ((1 << self.k) - 1);
        let use_gshare = self.chooser[c_idx] >= 2;
        let pred = if use_gshare { g_pred } else { b_pred };
        if pred != taken { self.misses += 1; }

        if use_gshare {
            Self::train(&mut self.gshare[g_idx], taken);
        } else {
            Self::train(&mut self.bimodal[b_idx], taken);
        }

        let c = &mut self.chooser[c_idx];
        if g_pred == taken && b_pred != taken && *c < 3 { *c += 1; }
        if g_pred != taken && b_pred == taken && *c > 0 { *c -= 1; }
    }
}

fn values(dump: &TableDump) -> Vec<u8> {
    dump.entries.iter().map(|(_, v)| *v).collect()
}

fn records_strategy() -> impl Strategy<Value = Vec<BranchRecord>> {
    // A handful of hot branches plus some noise in the upper address bits.
    let pcs = prop::sample::select(vec![
        0x0040_1000usize, 0x0040_1004, 0x0040_1010, 0x0040_2024,
        0x0041_1000, 0x7fff_f0fc,
    ]);
    prop::collection::vec((pcs, any::<bool>()), 0..400).prop_map(|v| {
        v.into_iter().map(|(pc, t)| BranchRecord::new(pc, t.into())).collect()
    })
}

proptest! {
    #[test]
    fn bimodal_matches_model(m2 in 0usize..6, records in records_strategy()) {
        let mut p = PredictorConfig::Bimodal { m2 }.build().unwrap();
        let mut model = Model::new(0, 1, 1, m2);
        simulate(&mut p, &records);
        for r in records.iter() {
            model.bimodal(r.pc, r.outcome.into());
        }
        prop_assert_eq!(p.mispredictions(), model.misses);
        prop_assert_eq!(values(&p.tables()[0]), model.bimodal);
    }

    #[test]
    fn gshare_matches_model(
        m1 in 1usize..8, n_seed in 1usize..8, records in records_strategy()
    ) {
        let n = 1 + (n_seed - 1) % m1;
        let mut p = PredictorConfig::Gshare { m1, n }.build().unwrap();
        let mut model = Model::new(0, m1, n, 1);
        simulate(&mut p, &records);
        for r in records.iter() {
            model.gshare(r.pc, r.outcome.into());
        }
        prop_assert_eq!(p.mispredictions(), model.misses);
        prop_assert_eq!(values(&p.tables()[0]), model.gshare);
    }

    #[test]
    fn hybrid_matches_model(
        k in 0usize..5, m1 in 1usize..8, n_seed in 1usize..8, m2 in 0usize..6,
        records in records_strategy()
    ) {
        let n = 1 + (n_seed - 1) % m1;
        let mut p = PredictorConfig::Hybrid { k, m1, n, m2 }.build().unwrap();
        let mut model = Model::new(k, m1, n, m2);
        simulate(&mut p, &records);
        for r in records.iter() {
            model.hybrid(r.pc, r.outcome.into());
        }
        let tables = p.tables();
        prop_assert_eq!(p.predictions(), records.len());
        prop_assert_eq!(p.mispredictions(), model.misses);
        prop_assert_eq!(values(&tables[0]), model.chooser);
        prop_assert_eq!(values(&tables[1]), model.gshare);
        prop_assert_eq!(values(&tables[2]), model.bimodal);
    }

    #[test]
    fn counters_stay_in_range(
        k in 0usize..4, m1 in 1usize..6, m2 in 0usize..5,
        records in records_strategy()
    ) {
        let mut p = PredictorConfig::Hybrid { k, m1, n: m1, m2 }.build().unwrap();
        simulate(&mut p, &records);
        for table in p.tables() {
            prop_assert!(table.entries.iter().all(|(_, v)| *v <= 3));
        }
    }
}

#[test]
fn report_from_trace_file() {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    for line in [
        "00400010 t", "00400014 n", "00400010 t", "00400014 n",
        "00400010 t", "00400014 t", "00400010 n", "00400014 n",
    ] {
        writeln!(f, "{}", line).unwrap();
    }

    let trace = TextTrace::from_file(f.path()).unwrap();
    let cfg = PredictorConfig::Gshare { m1: 2, n: 1 };
    let mut p = cfg.build().unwrap();
    simulate(&mut p, trace.as_slice());

    // pc 0x10 -> m_bits 0b00, pc 0x14 -> m_bits 0b01 (M1 = 2).
    //  history  pc    idx  ctr  pred  actual
    //  0        0x10  0b00 2    t     t   -> ctr[0] = 3, history 1
    //  1        0x14  0b11 2    t     n x -> ctr[3] = 1, history 0
    //  0        0x10  0b00 3    t     t   -> ctr[0] = 3, history 1
    //  1        0x14  0b11 1    n     n   -> ctr[3] = 0, history 0
    //  0        0x10  0b00 3    t     t   -> ctr[0] = 3, history 1
    //  1        0x14  0b11 0    n     t x -> ctr[3] = 1, history 1
    //  1        0x10  0b10 2    t     n x -> ctr[2] = 1, history 0
    //  0        0x14  0b01 2    t     n x -> ctr[1] = 1, history 0
    let report = Report::new(format!("sim {} trace.txt", cfg), &p);
    assert_eq!(report.to_string(), "\
COMMAND
sim gshare 2 1 trace.txt
OUTPUT
number of predictions:     8
number of mispredictions:  4
misprediction rate:        50.00%
FINAL GSHARE CONTENTS
0  3
1  1
2  1
3  1
");
}
