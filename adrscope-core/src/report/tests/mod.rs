mod delivery_tests;
mod report_tests;
