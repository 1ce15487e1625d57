//! Example scoring eleven DMUs with the weighted additive model.
//!
//! Runs the Measure of Inefficiency Proportions (MIP) under variable returns
//! to scale, prints efficiencies, slacks and peers, then compares the other
//! weighting schemes on the same data.

use additive_dea::additive::{AdditiveConfig, AdditiveInputs, deaadd, deaadd_with};
use additive_dea::types::ReturnsToScale;
use additive_dea::weights::AdditiveModel;
use ndarray::array;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Weighted Additive DEA Example");
    println!("=============================\n");

    // Two inputs, one output
    let x = array![
        [5.0, 13.0],
        [16.0, 12.0],
        [16.0, 26.0],
        [17.0, 15.0],
        [18.0, 14.0],
        [23.0, 6.0],
        [25.0, 10.0],
        [27.0, 22.0],
        [37.0, 14.0],
        [42.0, 25.0],
        [5.0, 17.0]
    ];
    let y = array![12.0, 14.0, 25.0, 26.0, 8.0, 9.0, 27.0, 30.0, 31.0, 26.0, 12.0];
    let names: Vec<String> = (b'A'..=b'K').map(|c| (c as char).to_string()).collect();

    let config = AdditiveConfig::default()
        .with_model(AdditiveModel::Mip)
        .with_rts(ReturnsToScale::Variable);
    let inputs = AdditiveInputs::new(&x, &y).with_names(names.clone());
    let model = deaadd_with(&inputs, &config)?;

    println!(
        "{} DMUs, {} inputs, {} outputs ({} weights, {})\n",
        model.nobs(),
        model.ninputs(),
        model.noutputs(),
        model.weights(),
        model.rts()
    );
    println!("DMU  efficiency    sX1       sX2       sY1     peers");
    for (i, name) in names.iter().enumerate() {
        let peers: Vec<String> = model
            .peers_of(i)
            .iter()
            .map(|&(j, w)| format!("{}:{:.3}", names[j], w))
            .collect();
        println!(
            "{:<4} {:>10.6} {:>9.4} {:>9.4} {:>9.4}   {}",
            name,
            model.efficiency()[i],
            model.slacks_x()[[i, 0]],
            model.slacks_x()[[i, 1]],
            model.slacks_y()[[i, 0]],
            peers.join(" ")
        );
    }

    println!("\nEfficiency by weighting scheme (VRS):");
    for scheme in [
        AdditiveModel::Ones,
        AdditiveModel::Normalized,
        AdditiveModel::Ram,
        AdditiveModel::Bam,
    ] {
        let result = deaadd(&x, &y, &config.clone().with_model(scheme))?;
        let scores: Vec<String> = result
            .efficiency()
            .iter()
            .map(|e| format!("{:.4}", e))
            .collect();
        println!("{:<10} {}", scheme, scores.join(" "));
    }

    println!("\nResult as JSON:");
    println!("{}", model.to_json()?);

    Ok(())
}
