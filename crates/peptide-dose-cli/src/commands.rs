//! Command handlers.

use anyhow::{Context, Result};
use peptide_dose_core::convert::{
    iu_to_mg, mcg_to_mg, mg_to_iu, mg_to_mcg, ml_to_units, units_to_ml,
};
use peptide_dose_core::{
    compute, compute_pen, format_number_with, inverse, CalculatorInputs, Database,
    InverseCalculationInputs, PenInputs, RoundingPrecision, SyringeCapacity,
};

use crate::cli::{CalcArgs, Conversion, InverseArgs, PenArgs, StateAction};
use crate::render::{self, CalcReport, NumberStyle, SyringeReport};

/// Overlay explicitly given flags on the saved inputs.
pub fn apply_overrides(mut inputs: CalculatorInputs, args: &CalcArgs) -> CalculatorInputs {
    if let Some(vial) = &args.vial {
        inputs.vial_amount = vial.clone();
    }
    if let Some(diluent) = &args.diluent {
        inputs.diluent_volume = diluent.clone();
    }
    if let Some(dose) = &args.dose {
        inputs.target_dose = dose.clone();
    }
    if let Some(unit) = args.unit {
        inputs.dose_unit = unit;
    }
    if let Some(display) = args.display {
        inputs.display_mode = display;
    }
    match args.round {
        Some(RoundingPrecision::None) => inputs.rounding_enabled = false,
        Some(precision) => {
            inputs.rounding_enabled = true;
            inputs.rounding_precision = precision;
        }
        None => {}
    }
    inputs
}

pub fn run_calc(db: &Database, args: &CalcArgs, style: NumberStyle) -> Result<String> {
    let saved = db.load_inputs().context("Failed to load saved inputs")?;
    let inputs = apply_overrides(saved, args);
    let result = compute(&inputs);
    let syringe = SyringeCapacity::new(args.syringe);

    if !args.no_save && db.save_inputs(&inputs).context("Failed to save inputs")? {
        tracing::info!("saved calculator inputs");
    }

    if args.json {
        let report = CalcReport {
            inputs: &inputs,
            result: &result,
            warnings: result.warnings(),
            syringe: SyringeReport::new(&syringe, result.units_u100_rounded),
        };
        return Ok(serde_json::to_string_pretty(&report)? + "\n");
    }

    Ok(render::render_calculation(&inputs, &result, &syringe, style))
}

pub fn run_inverse(db: &Database, args: &InverseArgs, style: NumberStyle) -> Result<String> {
    let concentration = match args.concentration {
        Some(c) => c,
        None => {
            let saved = db.load_inputs().context("Failed to load saved inputs")?;
            let concentration = compute(&saved).concentration_mg_per_ml;
            tracing::info!(concentration, "using concentration of saved vial");
            concentration
        }
    };

    let inputs = InverseCalculationInputs {
        volume_or_units: args.value.clone(),
        input_type: args.kind,
    };
    let result = inverse(&inputs, concentration);

    if args.json {
        return Ok(serde_json::to_string_pretty(&result)? + "\n");
    }
    Ok(render::render_inverse(&result, style))
}

pub fn run_pen(args: &PenArgs, style: NumberStyle) -> Result<String> {
    let inputs = PenInputs {
        cartridge_amount: args.cartridge,
        cartridge_unit: args.cartridge_unit,
        dose: args.dose,
        dose_unit: args.dose_unit,
    };
    let result = compute_pen(&inputs);

    if args.json {
        return Ok(serde_json::to_string_pretty(&result)? + "\n");
    }
    Ok(render::render_pen(&result, style))
}

pub fn run_convert(conversion: Conversion, value: f64, style: NumberStyle) -> String {
    let (converted, from, to) = match conversion {
        Conversion::MgToIu => (mg_to_iu(value), "mg", "IU"),
        Conversion::IuToMg => (iu_to_mg(value), "IU", "mg"),
        Conversion::MlToUnits => (ml_to_units(value), "mL", "units"),
        Conversion::UnitsToMl => (units_to_ml(value), "units", "mL"),
        Conversion::McgToMg => (mcg_to_mg(value), "mcg", "mg"),
        Conversion::MgToMcg => (mg_to_mcg(value), "mg", "mcg"),
    };
    format!(
        "{} {} = {} {}\n",
        format_number_with(value, style.decimals, style.locale),
        from,
        format_number_with(converted, style.decimals, style.locale),
        to
    )
}

pub fn run_state(db: &Database, action: &StateAction) -> Result<String> {
    match action {
        StateAction::Show => {
            let inputs = db.load_inputs().context("Failed to load saved inputs")?;
            Ok(serde_json::to_string_pretty(&inputs)? + "\n")
        }
        StateAction::Reset => {
            if db.clear_inputs().context("Failed to clear saved inputs")? {
                Ok("Saved inputs cleared.\n".to_string())
            } else {
                Ok("No saved inputs.\n".to_string())
            }
        }
    }
}
