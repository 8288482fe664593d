
mod internal_error;
mod root;
