pub mod aggregation_engine;
