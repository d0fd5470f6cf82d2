// Parenting Assistant - forms-driven AI parenting helper
// Library exports

pub mod config;
pub mod errors;
pub mod forms; // Feature areas, page descriptions, validated submissions
pub mod providers; // Content generators (OpenAI, offline)
pub mod render; // Handlebars page rendering
pub mod server; // HTTP front end
