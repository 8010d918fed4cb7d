// Imports Tests

mod references_spec;
