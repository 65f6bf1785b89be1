use approx::assert_relative_eq;
use contrast_coverage::ContrastError;
use contrast_coverage::lightness::LightnessModel;

#[test]
fn test_presets_are_normalized() {
    for model in LightnessModel::presets() {
        assert_relative_eq!(model.lightness(0.0).unwrap(), 0.0, epsilon = 1e-12);
        assert_relative_eq!(model.lightness(1.0).unwrap(), 1.0, epsilon = 1e-12);
    }
}

#[test]
fn test_presets_are_increasing() {
    let ys: Vec<f64> = (0..=100).map(|i| (i as f64 / 100.0).powi(2)).collect();
    for model in LightnessModel::presets() {
        let ls = model.lightnesses(&ys).unwrap();
        assert!(ls.windows(2).all(|w| w[0] < w[1]), "{model:?} not increasing");
    }
}

#[test]
fn test_weber_matches_closed_form() {
    let flare = 0.05;
    let model = LightnessModel::weber(flare).unwrap();
    let y = 0.18;
    let expected = (y / flare + 1.0).ln() / (1.0 / flare + 1.0).ln();
    assert_relative_eq!(model.lightness(y).unwrap(), expected, epsilon = 1e-12);
}

#[test]
fn test_stevens_without_flare_is_plain_power() {
    let model = LightnessModel::stevens(0.0, 0.6).unwrap();
    for y in [0.01, 0.2, 0.5, 0.9] {
        assert_relative_eq!(model.lightness(y).unwrap(), y.powf(0.6), epsilon = 1e-12);
    }
}

#[test]
fn test_higher_flare_compresses_shadows() {
    // Higher ambient flare compresses the shadows: mid-dark values map lower
    let low = LightnessModel::weber(0.05).unwrap().lightness(0.05).unwrap();
    let high = LightnessModel::weber(0.4).unwrap().lightness(0.05).unwrap();
    assert!(low > high);
}

#[test]
fn test_invalid_parameters() {
    assert!(matches!(
        LightnessModel::weber(0.0),
        Err(ContrastError::InvalidParameter(_))
    ));
    assert!(LightnessModel::weber(-0.1).is_err());
    assert!(LightnessModel::weber(f64::NAN).is_err());
    assert!(LightnessModel::stevens(0.0, 0.0).is_err());
    assert!(LightnessModel::stevens(0.0, -1.0).is_err());
    assert!(LightnessModel::stevens(-0.1, 0.5).is_err());
}

#[test]
fn test_unvalidated_model_is_checked_on_use() {
    let model = LightnessModel::Weber { flare: 0.0 };
    assert!(model.lightness(0.5).is_err());
}

#[test]
fn test_input_outside_domain() {
    let weber = LightnessModel::weber(0.05).unwrap();
    assert!(weber.lightness(-0.05).is_err());
    assert!(weber.lightness(f64::NAN).is_err());

    let stevens = LightnessModel::stevens(0.0, 0.5).unwrap();
    assert!(stevens.lightness(-0.1).is_err());
    assert!(stevens.lightnesses(&[0.1, -0.1]).is_err());
}
