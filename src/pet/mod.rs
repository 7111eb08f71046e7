mod estimator;
mod formula;

pub use estimator::{estimate, PetEstimate};
pub use formula::{
    exponent, heat_index, interpolate_hot, monthly_pet, sub_index, thornthwaite_formula,
    HOT_PET_TABLE, HOT_THRESHOLD,
};
