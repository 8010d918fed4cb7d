// TypeCheck Tests

mod context_spec;
