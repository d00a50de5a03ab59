pub mod boundary_query_arcgis;
