
mod applier_tests;
