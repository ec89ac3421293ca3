mod path_bounds;
