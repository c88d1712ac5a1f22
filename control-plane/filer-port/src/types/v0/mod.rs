/// Transport types exchanged with the filer backend.
pub mod transport;
