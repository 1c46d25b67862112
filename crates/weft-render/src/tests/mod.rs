//! Test suites for the preview coordinators.
