pub mod audit;
pub mod billing;
pub mod ce_credit;
pub mod client;
pub mod consent;
pub mod document;
pub mod intake_form;
pub mod message;
pub mod note;
pub mod portal_account;
pub mod referral;
pub mod safety_plan;
pub mod suggestion;
pub mod task;
pub mod treatment_plan;
