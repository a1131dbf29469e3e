//! Static lookup tables shared by the model and the SMILES codec.

pub mod elements;
