mod integration_impl;

mod integration {
    mod conflicts;
    mod imports;
    mod queries;
    mod resolve_basic;
    mod tables;
}
