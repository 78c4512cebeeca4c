// Application layer - Use cases and the persistence seams they depend on
pub mod dataset_service;
pub mod prediction_service;
pub mod repository;
pub mod series_generator;
pub mod training_service;
