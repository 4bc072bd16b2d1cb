pub mod claim_conditions;
