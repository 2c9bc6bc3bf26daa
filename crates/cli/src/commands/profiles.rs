use fitfinder_core::config::LoadOptions;
use fitfinder_core::form::profile_defaults;
use fitfinder_core::CustomerProfile;
use serde::Serialize;

use crate::commands::{load_context, CommandResult};

#[derive(Debug, Serialize)]
struct ProfileView {
    name: String,
    height: Option<String>,
    weight: Option<String>,
    style: String,
    preferred_fit: String,
    usual_brand: Option<String>,
    usual_size: Option<String>,
    purchase_history: String,
}

pub fn run(options: &LoadOptions) -> CommandResult {
    let (_, dataset) = match load_context("profiles", options) {
        Ok(context) => context,
        Err(failure) => return failure,
    };

    let profiles: Vec<_> = dataset.profiles().iter().map(view).collect();
    CommandResult::json("profiles", &profiles)
}

fn view(profile: &CustomerProfile) -> ProfileView {
    let defaults = profile_defaults(profile);
    ProfileView {
        name: defaults.profile,
        height: defaults.height,
        weight: defaults.weight,
        style: profile.style.clone(),
        preferred_fit: profile.preferred_fit.clone(),
        usual_brand: defaults.usual_brand,
        usual_size: defaults.usual_size,
        purchase_history: profile.history_summary(),
    }
}
